//! Survey operations over any [`SurveyStore`].

use crate::dto::{CustomerResponse, SurveyRequest, SurveyResponseDto, SurveySummary};
use crate::error::AppError;
use crate::models::SubmittedSurvey;
use crate::service::summary::summarize;
use crate::service::validation::RequestValidator;
use crate::store::{ListFilter, SurveyStore};
use chrono::NaiveDate;

pub struct SurveyService;

impl SurveyService {
    /// Validate the request and store the customer and its response together.
    pub async fn submit(
        store: &dyn SurveyStore,
        request: &SurveyRequest,
        visit_date: NaiveDate,
    ) -> Result<SubmittedSurvey, AppError> {
        let survey = RequestValidator::validate_survey(request, visit_date)?;
        let submitted = store.submit(&survey).await?;
        tracing::info!(
            customer_id = submitted.customer.id,
            response_id = submitted.response.id,
            location = %submitted.customer.location,
            "survey submitted"
        );
        Ok(submitted)
    }

    pub async fn customers(
        store: &dyn SurveyStore,
        filter: &ListFilter,
    ) -> Result<Vec<CustomerResponse>, AppError> {
        let rows = store.list_customers(filter).await?;
        Ok(rows.into_iter().map(CustomerResponse::from).collect())
    }

    pub async fn responses(
        store: &dyn SurveyStore,
        filter: &ListFilter,
    ) -> Result<Vec<SurveyResponseDto>, AppError> {
        let rows = store.list_responses(filter).await?;
        Ok(rows.into_iter().map(SurveyResponseDto::from).collect())
    }

    pub async fn summary(
        store: &dyn SurveyStore,
        filter: &ListFilter,
    ) -> Result<SurveySummary, AppError> {
        let responses = Self::responses(store, filter).await?;
        Ok(summarize(&responses))
    }
}

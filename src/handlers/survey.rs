//! Survey handlers: submit, list customers, list responses, summary.

use crate::dto::{CustomerResponse, ListQuery, SurveyRequest, SurveyResponseDto, SurveySummary};
use crate::error::{AppError, ErrorBody};
use crate::extractors::JsonBody;
use crate::service::SurveyService;
use crate::state::AppState;
use crate::store::ListFilter;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

pub const SUBMITTED_MESSAGE: &str = "Survey submitted successfully!";

/// An empty `location` means no filter; any other value is matched exactly.
impl From<ListQuery> for ListFilter {
    fn from(q: ListQuery) -> Self {
        ListFilter {
            location: q.location.filter(|l| !l.is_empty()),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/survey",
    tag = "survey",
    request_body = SurveyRequest,
    responses(
        (status = 200, description = "Survey stored", body = String, content_type = "text/plain"),
        (status = 400, description = "Validation failed or malformed body", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    )
)]
pub async fn submit_survey(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SurveyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let visit_date = Utc::now().date_naive();
    SurveyService::submit(state.store.as_ref(), &body, visit_date).await?;
    Ok((StatusCode::OK, SUBMITTED_MESSAGE))
}

#[utoipa::path(
    get,
    path = "/api/survey/customers",
    tag = "survey",
    params(ListQuery),
    responses(
        (status = 200, description = "All customers ordered by id", body = [CustomerResponse]),
        (status = 500, description = "Store failure", body = ErrorBody),
    )
)]
pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let rows = SurveyService::customers(state.store.as_ref(), &query.into()).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/survey/responses",
    tag = "survey",
    params(ListQuery),
    responses(
        (status = 200, description = "All survey responses ordered by id", body = [SurveyResponseDto]),
        (status = 500, description = "Store failure", body = ErrorBody),
    )
)]
pub async fn list_responses(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SurveyResponseDto>>, AppError> {
    let rows = SurveyService::responses(state.store.as_ref(), &query.into()).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/survey/summary",
    tag = "survey",
    params(ListQuery),
    responses(
        (status = 200, description = "Aggregated survey figures", body = SurveySummary),
        (status = 500, description = "Store failure", body = ErrorBody),
    )
)]
pub async fn survey_summary(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<SurveySummary>, AppError> {
    let summary = SurveyService::summary(state.store.as_ref(), &query.into()).await?;
    Ok(Json(summary))
}

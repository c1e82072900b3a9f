//! Survey routes under /api/survey.

use crate::handlers::survey::{list_customers, list_responses, submit_survey, survey_summary};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn survey_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/survey", post(submit_survey))
        .route("/api/survey/customers", get(list_customers))
        .route("/api/survey/responses", get(list_responses))
        .route("/api/survey/summary", get(survey_summary))
        .with_state(state)
}

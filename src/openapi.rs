//! OpenAPI document for the survey routes, served at `/api-docs/openapi.json`.

use crate::dto::{CustomerResponse, LocationStats, SurveyRequest, SurveyResponseDto, SurveySummary};
use crate::error::ErrorBody;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::survey::submit_survey,
        crate::handlers::survey::list_customers,
        crate::handlers::survey::list_responses,
        crate::handlers::survey::survey_summary,
    ),
    components(schemas(
        SurveyRequest,
        CustomerResponse,
        SurveyResponseDto,
        SurveySummary,
        LocationStats,
        ErrorBody,
    )),
    tags((name = "survey", description = "Customer satisfaction survey collection"))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn openapi_routes() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

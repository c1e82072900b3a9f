//! Survey backend: customer satisfaction survey collection over a small REST API.

pub mod config;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{Settings, StoreKind};
pub use error::{AppError, ConfigError, ErrorBody, FieldErrors};
pub use routes::{app_router, common_routes, survey_routes};
pub use service::SurveyService;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables, MemorySurveyStore, PgSurveyStore, SurveyStore};

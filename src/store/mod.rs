//! Persistence for customers and survey responses.
//!
//! Handlers only see [`SurveyStore`]. [`PgSurveyStore`] is the production
//! implementation; [`MemorySurveyStore`] keeps rows in process and backs the
//! integration tests and `SURVEY_STORE=memory` runs.

mod memory;
mod postgres;

pub use memory::MemorySurveyStore;
pub use postgres::{ensure_database_exists, ensure_tables, PgSurveyStore};

use crate::error::AppError;
use crate::models::{Customer, NewSurvey, SubmittedSurvey, SurveyResponseRecord};
use async_trait::async_trait;

/// Optional row filter shared by the list operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Exact match on the customer's location.
    pub location: Option<String>,
}

impl ListFilter {
    pub fn location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
        }
    }

    pub(crate) fn matches_location(&self, location: &str) -> bool {
        self.location.as_deref().map_or(true, |l| l == location)
    }
}

/// Append-only access to the two survey tables.
#[async_trait]
pub trait SurveyStore: Send + Sync + 'static {
    /// Insert the customer, then the response referencing it. Both rows are written or neither is.
    async fn submit(&self, survey: &NewSurvey) -> Result<SubmittedSurvey, AppError>;

    /// All customers matching `filter`, ordered by id.
    async fn list_customers(&self, filter: &ListFilter) -> Result<Vec<Customer>, AppError>;

    /// All responses joined with their customer, matching `filter`, ordered by id.
    async fn list_responses(&self, filter: &ListFilter)
        -> Result<Vec<SurveyResponseRecord>, AppError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}

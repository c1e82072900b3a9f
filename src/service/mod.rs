//! Survey submission, listing and aggregation on top of the store.

pub mod summary;
mod survey;
mod validation;
pub use summary::{satisfaction_level, summarize, SatisfactionLevel};
pub use survey::SurveyService;
pub use validation::{round_to_tenth, RequestValidator, MAX_RATING, MIN_RATING};

//! HTTP handlers for the survey API.

pub mod survey;
pub use survey::*;

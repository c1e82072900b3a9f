//! Shared application state for all routes.

use crate::store::SurveyStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SurveyStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SurveyStore>) -> Self {
        Self { store }
    }
}

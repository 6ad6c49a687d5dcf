use std::sync::Arc;

use crate::db::RatingStore;
use crate::services::RecommendationEngine;

/// Shared application state
///
/// Nothing here changes between requests; every recommendation reads a fresh
/// snapshot from the store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RatingStore>,
    pub engine: Arc<RecommendationEngine>,
}

impl AppState {
    pub fn new(store: Arc<dyn RatingStore>, engine: RecommendationEngine) -> Self {
        Self {
            store,
            engine: Arc::new(engine),
        }
    }
}

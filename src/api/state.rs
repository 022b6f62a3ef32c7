use std::sync::Arc;

use crate::services::recommender::Recommender;

/// Shared application state
///
/// The recommender owns the catalog and similarity matrix, both read-only
/// after startup, so handlers share it without a lock.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(recommender: Recommender) -> Self {
        Self {
            recommender: Arc::new(recommender),
        }
    }
}

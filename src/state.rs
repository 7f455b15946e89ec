use crate::store::ItemStore;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: ItemStore,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: ItemStore) -> Self {
        Self {
            store,
            started_at: Instant::now(),
        }
    }
}

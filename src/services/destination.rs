use crate::error::Result;
use crate::models::{Destination, DestinationSuggestion};
use crate::store::DestinationStore;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct DestinationService {
    store: Arc<DestinationStore>,
    timeout: Duration,
}

impl DestinationService {
    pub fn new(store: Arc<DestinationStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Autocomplete suggestions for a free-text query. Queries shorter
    /// than 2 characters short-circuit to an empty list before the store
    /// is consulted.
    pub async fn search(&self, query: &str) -> Result<Vec<DestinationSuggestion>> {
        if query.trim().chars().count() < 2 {
            return Ok(Vec::new());
        }
        let store = Arc::clone(&self.store);
        let query = query.to_string();
        tokio::time::timeout(self.timeout, async move { store.search(&query) }).await?
    }

    pub async fn popular(&self) -> Result<Vec<Destination>> {
        let store = Arc::clone(&self.store);
        tokio::time::timeout(self.timeout, async move { store.popular() }).await?
    }
}

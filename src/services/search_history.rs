use crate::error::{ApiError, Result};
use crate::models::{HistoryPage, Statistics};
use crate::store::UserStore;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

#[derive(Clone)]
pub struct SearchHistoryService {
    store: Arc<UserStore>,
    timeout: Duration,
}

impl SearchHistoryService {
    pub fn new(store: Arc<UserStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Records one search, deduplicating against the last hour. Empty
    /// endpoints are rejected before the store is touched.
    pub async fn record(&self, user_id: Uuid, from: &str, to: &str) -> Result<()> {
        let from = from.trim().to_string();
        let to = to.trim().to_string();
        if from.is_empty() {
            return Err(ApiError::InvalidInput("From location is required".to_string()));
        }
        if to.is_empty() {
            return Err(ApiError::InvalidInput("To location is required".to_string()));
        }

        let store = Arc::clone(&self.store);
        tokio::time::timeout(self.timeout, async move {
            store.record_search(user_id, &from, &to)
        })
        .await?
    }

    pub async fn list(&self, user_id: Uuid, page: usize, limit: usize) -> Result<HistoryPage> {
        let store = Arc::clone(&self.store);
        tokio::time::timeout(self.timeout, async move {
            store.list_history(user_id, page, limit)
        })
        .await?
    }

    pub async fn delete(&self, user_id: Uuid, entry_id: Uuid) -> Result<()> {
        let store = Arc::clone(&self.store);
        tokio::time::timeout(self.timeout, async move {
            store.delete_history_entry(user_id, entry_id)
        })
        .await?
    }

    pub async fn clear(&self, user_id: Uuid) -> Result<()> {
        let store = Arc::clone(&self.store);
        tokio::time::timeout(self.timeout, async move { store.clear_history(user_id) }).await?
    }

    pub async fn statistics(&self, user_id: Uuid) -> Result<Statistics> {
        let store = Arc::clone(&self.store);
        tokio::time::timeout(self.timeout, async move { store.statistics(user_id) }).await?
    }
}

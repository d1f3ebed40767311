use crate::error::{ApiError, Result};
use crate::models::{Path, TransportType};
use crate::store::PathStore;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

#[derive(Clone)]
pub struct PathService {
    store: Arc<PathStore>,
    timeout: Duration,
}

impl PathService {
    pub fn new(store: Arc<PathStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Path lookup between two places. Both endpoints are required;
    /// validation happens before any store access.
    pub async fn find(
        &self,
        from: Option<&str>,
        to: Option<&str>,
        transport_type: Option<TransportType>,
    ) -> Result<Vec<Path>> {
        let from = required(from, "From and to parameters are required")?;
        let to = required(to, "From and to parameters are required")?;

        let store = Arc::clone(&self.store);
        tokio::time::timeout(self.timeout, async move {
            store.find(&from, &to, transport_type)
        })
        .await?
    }

    pub async fn get(&self, id: Uuid) -> Result<Path> {
        let store = Arc::clone(&self.store);
        tokio::time::timeout(self.timeout, async move { store.get(id) }).await?
    }
}

fn required(value: Option<&str>, message: &str) -> Result<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::InvalidInput(message.to_string()))
}

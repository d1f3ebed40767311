use crate::error::Result;
use crate::models::{Preferences, PreferencesUpdateRequest};
use crate::store::UserStore;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

#[derive(Clone)]
pub struct PreferencesService {
    store: Arc<UserStore>,
    timeout: Duration,
}

impl PreferencesService {
    pub fn new(store: Arc<UserStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn get(&self, user_id: Uuid) -> Result<Preferences> {
        let store = Arc::clone(&self.store);
        tokio::time::timeout(self.timeout, async move { store.preferences(user_id) }).await?
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        update: PreferencesUpdateRequest,
    ) -> Result<Preferences> {
        let store = Arc::clone(&self.store);
        tokio::time::timeout(self.timeout, async move {
            store.update_preferences(user_id, &update)
        })
        .await?
    }
}

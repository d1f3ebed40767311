use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use super::path::TransportType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Budget,
    Comfort,
    Luxury,
}

impl Default for TravelStyle {
    fn default() -> Self {
        TravelStyle::Comfort
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub travel_style: TravelStyle,
    #[serde(default)]
    pub preferred_transport: Vec<TransportType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub searched_at: DateTime<Utc>,
}

impl SearchHistoryEntry {
    pub fn matches_route(&self, from: &str, to: &str) -> bool {
        self.from.to_lowercase() == from.to_lowercase()
            && self.to.to_lowercase() == to.to_lowercase()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub search_history: VecDeque<SearchHistoryEntry>,
}

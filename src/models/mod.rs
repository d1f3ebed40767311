use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use destination::{Coordinates, Destination, DestinationSuggestion, DestinationType};
pub use path::{ComfortLevel, Path, Station, TransportOption, TransportType};
pub use user::{Preferences, SearchHistoryEntry, TravelStyle, User};

mod destination;
mod path;
mod user;

/// Query parameters for destination autocomplete
#[derive(Debug, Clone, Deserialize)]
pub struct DestinationSearchQuery {
    /// Free-text query; fewer than 2 characters yields an empty result
    #[serde(default)]
    pub query: String,
}

/// Query parameters for path lookup
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathsQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    /// Restrict to paths offering at least one option of this type
    pub transport_type: Option<TransportType>,
}

/// Query parameters for paged history listing (1-indexed)
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Request body for recording a search in the user's history
#[derive(Debug, Clone, Deserialize)]
pub struct RecordSearchRequest {
    pub from: String,
    pub to: String,
}

/// Request body for updating travel preferences; absent fields are kept
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdateRequest {
    pub travel_style: Option<TravelStyle>,
    pub preferred_transport: Option<Vec<TransportType>>,
}

/// One page of history entries plus the total count before paging
#[derive(Debug, Clone, Serialize)]
pub struct HistoryPage {
    pub entries: Vec<SearchHistoryEntry>,
    pub total: usize,
}

/// A (from, to) pair with how often the user searched it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteCount {
    pub route: String,
    pub count: usize,
}

/// Aggregate statistics over a user's search history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_searches: usize,
    pub recent_searches: usize,
    pub favorite_routes: Vec<RouteCount>,
    pub member_since: DateTime<Utc>,
    pub account_age_days: i64,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    20
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    Train,
    Bus,
    Flight,
    Car,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComfortLevel {
    Economy,
    Comfort,
    Luxury,
}

impl Default for ComfortLevel {
    fn default() -> Self {
        ComfortLevel::Comfort
    }
}

/// A waypoint inside a path. Cost and distance are cumulative from the
/// route's origin; times and duration are display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_from_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_start: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportOption {
    #[serde(rename = "type")]
    pub transport_type: TransportType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub cost: f64,
    pub duration: String,
    #[serde(default)]
    pub comfort_level: ComfortLevel,
    #[serde(default)]
    pub features: Vec<String>,
}

/// A stored candidate route between two named places. `from`/`to` are free
/// text with no enforced relationship to the destination catalog; the
/// station sequence is ordered (first is origin, last is destination).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<String>,
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub transport_options: Vec<TransportOption>,
    #[serde(default)]
    pub popularity: u64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Path {
    /// True when at least one transport option is of the given type.
    pub fn offers_transport(&self, transport_type: TransportType) -> bool {
        self.transport_options
            .iter()
            .any(|option| option.transport_type == transport_type)
    }
}

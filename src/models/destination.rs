use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationType {
    City,
    Town,
    Village,
    Landmark,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A catalog entry for a searchable place. Seeded out of band; the core
/// never creates or deletes destinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub destination_type: DestinationType,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub popularity: u64,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Autocomplete projection: coordinates and tags are withheld.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationSuggestion {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    #[serde(rename = "type")]
    pub destination_type: DestinationType,
}

impl From<&Destination> for DestinationSuggestion {
    fn from(dest: &Destination) -> Self {
        Self {
            id: dest.id,
            name: dest.name.clone(),
            country: dest.country.clone(),
            destination_type: dest.destination_type,
        }
    }
}

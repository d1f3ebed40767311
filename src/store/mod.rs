use crate::models::{Destination, Path, User};
use anyhow::Context;
use log::info;
use serde::Deserialize;

pub use destination::DestinationStore;
pub use path::PathStore;
pub use user::UserStore;

mod destination;
mod path;
mod user;

/// On-disk seed shape. Destinations, paths, and users are created by an
/// out-of-band process; the server only ever reads this at startup.
#[derive(Debug, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub paths: Vec<Path>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl SeedFile {
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let seed: SeedFile = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse seed file {}", path.display()))?;
        Ok(seed)
    }

    pub fn apply(
        self,
        destinations: &DestinationStore,
        paths: &PathStore,
        users: &UserStore,
    ) -> crate::error::Result<()> {
        let (dest_count, path_count, user_count) = (
            self.destinations.len(),
            self.paths.len(),
            self.users.len(),
        );
        for destination in self.destinations {
            destinations.insert(destination)?;
        }
        for path in self.paths {
            paths.insert(path)?;
        }
        for user in self.users {
            users.insert(user)?;
        }
        info!(
            "Seeded {} destinations, {} paths, {} users",
            dest_count, path_count, user_count
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_seed_file_round_trips_into_stores() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "destinations": [
                    {{"name": "Paris", "type": "city", "country": "France", "popularity": 9}}
                ],
                "paths": [
                    {{
                        "from": "Paris", "to": "Rome",
                        "stations": [{{"name": "Paris"}}, {{"name": "Rome"}}],
                        "transportOptions": [
                            {{"type": "train", "cost": 89.0, "duration": "11h"}}
                        ]
                    }}
                ],
                "users": [
                    {{"name": "Ada", "email": "ada@example.com"}}
                ]
            }}"#
        )
        .unwrap();

        let seed = SeedFile::load(file.path()).unwrap();
        let destinations = DestinationStore::new();
        let paths = PathStore::new();
        let users = UserStore::new();
        seed.apply(&destinations, &paths, &users).unwrap();

        assert_eq!(destinations.len().unwrap(), 1);
        assert_eq!(paths.len().unwrap(), 1);
        let hits = destinations.search("par").unwrap();
        assert_eq!(hits[0].name, "Paris");
    }

    #[test]
    fn test_missing_seed_field_defaults_to_empty() {
        let seed: SeedFile = serde_json::from_str("{}").unwrap();
        assert!(seed.destinations.is_empty());
        assert!(seed.paths.is_empty());
        assert!(seed.users.is_empty());
    }
}

use crate::error::Result;
use crate::models::{Destination, DestinationSuggestion};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use uuid::Uuid;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{Alphabetic}\p{N}]+").unwrap());

/// Autocomplete answers at most this many suggestions.
const SEARCH_LIMIT: usize = 10;
/// The popular-destinations listing answers at most this many documents.
const POPULAR_LIMIT: usize = 8;

#[derive(Default)]
struct Catalog {
    docs: HashMap<Uuid, Destination>,
    /// Inverted index: lowercased token from name/country -> owning ids.
    index: HashMap<String, HashSet<Uuid>>,
    /// Insertion order, used to keep popularity ties stable.
    order: Vec<Uuid>,
}

/// In-process destination catalog with an explicit text index over
/// `name` + `country`. Search is read-only; popularity comes from seed
/// data and is never incremented here.
#[derive(Default)]
pub struct DestinationStore {
    catalog: RwLock<Catalog>,
}

fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(text)
        .map(|token| token.as_str().to_lowercase())
        .collect()
}

impl DestinationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, destination: Destination) -> Result<()> {
        let mut catalog = self.catalog.write()?;
        let id = destination.id;
        for token in tokenize(&destination.name)
            .into_iter()
            .chain(tokenize(&destination.country))
        {
            catalog.index.entry(token).or_default().insert(id);
        }
        catalog.order.push(id);
        catalog.docs.insert(id, destination);
        Ok(())
    }

    /// Case-insensitive token-prefix search over name and country.
    /// Queries shorter than 2 characters return empty without consulting
    /// the index. Results are ordered by popularity descending (stable)
    /// and projected down to the suggestion shape.
    pub fn search(&self, query: &str) -> Result<Vec<DestinationSuggestion>> {
        let query = query.trim();
        if query.chars().count() < 2 {
            return Ok(Vec::new());
        }

        let catalog = self.catalog.read()?;
        let mut matched: HashSet<Uuid> = HashSet::new();
        for query_token in tokenize(query) {
            for (token, ids) in &catalog.index {
                if token.starts_with(&query_token) {
                    matched.extend(ids);
                }
            }
        }

        let mut hits: Vec<&Destination> = catalog
            .order
            .iter()
            .filter(|id| matched.contains(id))
            .filter_map(|id| catalog.docs.get(id))
            .collect();
        hits.sort_by(|a, b| b.popularity.cmp(&a.popularity));

        Ok(hits
            .into_iter()
            .take(SEARCH_LIMIT)
            .map(DestinationSuggestion::from)
            .collect())
    }

    /// Full documents for the most popular destinations.
    pub fn popular(&self) -> Result<Vec<Destination>> {
        let catalog = self.catalog.read()?;
        let mut all: Vec<&Destination> = catalog
            .order
            .iter()
            .filter_map(|id| catalog.docs.get(id))
            .collect();
        all.sort_by(|a, b| b.popularity.cmp(&a.popularity));
        Ok(all.into_iter().take(POPULAR_LIMIT).cloned().collect())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.catalog.read()?.docs.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

use crate::error::{ApiError, Result};
use crate::models::{Path, TransportType};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use uuid::Uuid;

/// Path lookup answers at most this many routes.
const FIND_LIMIT: usize = 10;

struct PathRecord {
    path: Path,
    /// Live popularity counter. Incremented with fetch_add so concurrent
    /// searches bumping the same path never lose an update.
    popularity: AtomicU64,
}

impl PathRecord {
    fn snapshot(&self) -> Path {
        let mut path = self.path.clone();
        path.popularity = self.popularity.load(Ordering::Relaxed);
        path
    }
}

#[derive(Default)]
struct Routes {
    records: HashMap<Uuid, PathRecord>,
    /// Insertion order, used to keep popularity ties stable.
    order: Vec<Uuid>,
}

/// In-process catalog of stored routes. Every retrieval counts as a view:
/// `find` bumps each returned path and `get` bumps the fetched one.
#[derive(Default)]
pub struct PathStore {
    routes: RwLock<Routes>,
}

impl PathStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: Path) -> Result<()> {
        let mut routes = self.routes.write()?;
        let id = path.id;
        let popularity = AtomicU64::new(path.popularity);
        routes.order.push(id);
        routes.records.insert(id, PathRecord { path, popularity });
        Ok(())
    }

    /// Case-insensitive substring match on `from`/`to`, optionally
    /// restricted to paths offering the given transport type. Results are
    /// ordered by popularity descending; each matched path's counter is
    /// bumped by exactly 1. The returned snapshots carry the values seen
    /// at selection time, before the bump.
    pub fn find(
        &self,
        from: &str,
        to: &str,
        transport_type: Option<TransportType>,
    ) -> Result<Vec<Path>> {
        let from = from.to_lowercase();
        let to = to.to_lowercase();

        let routes = self.routes.read()?;
        let mut matched: Vec<&PathRecord> = routes
            .order
            .iter()
            .filter_map(|id| routes.records.get(id))
            .filter(|record| {
                record.path.from.to_lowercase().contains(&from)
                    && record.path.to.to_lowercase().contains(&to)
            })
            .filter(|record| match transport_type {
                Some(wanted) => record.path.offers_transport(wanted),
                None => true,
            })
            .collect();

        let mut snapshots: Vec<(Path, &PathRecord)> = matched
            .drain(..)
            .map(|record| (record.snapshot(), record))
            .collect();
        snapshots.sort_by(|a, b| b.0.popularity.cmp(&a.0.popularity));
        snapshots.truncate(FIND_LIMIT);

        let mut results = Vec::with_capacity(snapshots.len());
        for (snapshot, record) in snapshots {
            record.popularity.fetch_add(1, Ordering::Relaxed);
            results.push(snapshot);
        }
        Ok(results)
    }

    /// Fetch one path by id, bumping its counter. The returned document
    /// carries the incremented value. A missing id mutates nothing.
    pub fn get(&self, id: Uuid) -> Result<Path> {
        let routes = self.routes.read()?;
        let record = routes
            .records
            .get(&id)
            .ok_or_else(|| ApiError::NotFound("Path not found".to_string()))?;
        let previous = record.popularity.fetch_add(1, Ordering::Relaxed);
        let mut path = record.path.clone();
        path.popularity = previous + 1;
        Ok(path)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.routes.read()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

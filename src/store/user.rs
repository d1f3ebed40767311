use crate::error::{ApiError, Result};
use crate::models::{
    HistoryPage, Preferences, PreferencesUpdateRequest, RouteCount, SearchHistoryEntry, Statistics,
    User,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// A user's history keeps at most this many entries; the oldest end of
/// the sequence is evicted on overflow.
const HISTORY_CAP: usize = 50;
/// An identical (from, to) search inside this window refreshes the
/// existing entry instead of appending a duplicate.
const DEDUP_WINDOW_SECS: i64 = 3600;
/// "Recent" searches in statistics cover the last 30 days.
const RECENT_WINDOW_DAYS: i64 = 30;
/// Statistics report at most this many favorite routes.
const FAVORITE_ROUTES: usize = 5;

/// In-process user records with embedded, size-capped search history.
/// The dedup check and the append happen under one write guard, so
/// concurrent duplicate records collapse to a single entry.
#[derive(Default)]
pub struct UserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

fn not_found() -> ApiError {
    ApiError::NotFound("User not found".to_string())
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) -> Result<()> {
        self.users.write()?.insert(user.id, user);
        Ok(())
    }

    pub fn record_search(&self, user_id: Uuid, from: &str, to: &str) -> Result<()> {
        self.record_search_at(user_id, from, to, Utc::now())
    }

    fn record_search_at(
        &self,
        user_id: Uuid,
        from: &str,
        to: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let mut users = self.users.write()?;
        let user = users.get_mut(&user_id).ok_or_else(not_found)?;

        let window_start = now - Duration::seconds(DEDUP_WINDOW_SECS);
        if let Some(entry) = user
            .search_history
            .iter_mut()
            .find(|entry| entry.matches_route(from, to) && entry.searched_at > window_start)
        {
            entry.searched_at = now;
            return Ok(());
        }

        user.search_history.push_back(SearchHistoryEntry {
            id: Uuid::new_v4(),
            from: from.to_string(),
            to: to.to_string(),
            searched_at: now,
        });
        while user.search_history.len() > HISTORY_CAP {
            user.search_history.pop_front();
        }
        Ok(())
    }

    /// One page of history, newest first. The full history is sorted by
    /// `searched_at` before slicing since a dedup refresh leaves storage
    /// order non-chronological.
    pub fn list_history(&self, user_id: Uuid, page: usize, limit: usize) -> Result<HistoryPage> {
        let users = self.users.read()?;
        let user = users.get(&user_id).ok_or_else(not_found)?;

        let mut entries: Vec<SearchHistoryEntry> =
            user.search_history.iter().cloned().collect();
        entries.sort_by(|a, b| b.searched_at.cmp(&a.searched_at));

        let total = entries.len();
        let skip = page.saturating_sub(1) * limit;
        let entries = entries.into_iter().skip(skip).take(limit).collect();
        Ok(HistoryPage { entries, total })
    }

    /// Removes at most one entry. An absent entry id is a silent success.
    pub fn delete_history_entry(&self, user_id: Uuid, entry_id: Uuid) -> Result<()> {
        let mut users = self.users.write()?;
        let user = users.get_mut(&user_id).ok_or_else(not_found)?;
        if let Some(position) = user.search_history.iter().position(|e| e.id == entry_id) {
            user.search_history.remove(position);
        }
        Ok(())
    }

    pub fn clear_history(&self, user_id: Uuid) -> Result<()> {
        let mut users = self.users.write()?;
        let user = users.get_mut(&user_id).ok_or_else(not_found)?;
        user.search_history.clear();
        Ok(())
    }

    pub fn statistics(&self, user_id: Uuid) -> Result<Statistics> {
        self.statistics_at(user_id, Utc::now())
    }

    fn statistics_at(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<Statistics> {
        let users = self.users.read()?;
        let user = users.get(&user_id).ok_or_else(not_found)?;

        let recent_cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
        let recent_searches = user
            .search_history
            .iter()
            .filter(|entry| entry.searched_at > recent_cutoff)
            .count();

        // Count routes by the literal pair; first-encounter order is kept
        // separately so ties stay stable through the sort.
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut first_seen: Vec<String> = Vec::new();
        for entry in &user.search_history {
            let route = format!("{} → {}", entry.from, entry.to);
            let count = counts.entry(route.clone()).or_insert(0);
            if *count == 0 {
                first_seen.push(route);
            }
            *count += 1;
        }
        let mut route_counts: Vec<RouteCount> = first_seen
            .into_iter()
            .map(|route| {
                let count = counts[&route];
                RouteCount { route, count }
            })
            .collect();
        route_counts.sort_by(|a, b| b.count.cmp(&a.count));
        route_counts.truncate(FAVORITE_ROUTES);

        Ok(Statistics {
            total_searches: user.search_history.len(),
            recent_searches,
            favorite_routes: route_counts,
            member_since: user.created_at,
            account_age_days: (now - user.created_at).num_days(),
        })
    }

    pub fn preferences(&self, user_id: Uuid) -> Result<Preferences> {
        let users = self.users.read()?;
        let user = users.get(&user_id).ok_or_else(not_found)?;
        Ok(user.preferences.clone())
    }

    pub fn update_preferences(
        &self,
        user_id: Uuid,
        update: &PreferencesUpdateRequest,
    ) -> Result<Preferences> {
        let mut users = self.users.write()?;
        let user = users.get_mut(&user_id).ok_or_else(not_found)?;
        if let Some(travel_style) = update.travel_style {
            user.preferences.travel_style = travel_style;
        }
        if let Some(preferred_transport) = &update.preferred_transport {
            user.preferences.preferred_transport = preferred_transport.clone();
        }
        Ok(user.preferences.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TravelStyle;
    use std::collections::VecDeque;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: Utc::now() - Duration::days(100),
            preferences: Preferences::default(),
            search_history: VecDeque::new(),
        }
    }

    fn seeded() -> (UserStore, Uuid) {
        let store = UserStore::new();
        let user = user();
        let id = user.id;
        store.insert(user).unwrap();
        (store, id)
    }

    #[test]
    fn test_duplicate_inside_window_refreshes_timestamp() {
        let (store, id) = seeded();
        let first = Utc::now() - Duration::minutes(20);
        let second = Utc::now();
        store.record_search_at(id, "Paris", "Rome", first).unwrap();
        store.record_search_at(id, "paris", "ROME", second).unwrap();

        let page = store.list_history(id, 1, 20).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.entries[0].searched_at, second);
        // The original casing of the first record is kept.
        assert_eq!(page.entries[0].from, "Paris");
    }

    #[test]
    fn test_duplicate_dedup_handles_non_ascii_names() {
        let (store, id) = seeded();
        let first = Utc::now() - Duration::minutes(10);
        store.record_search_at(id, "Köln", "Rome", first).unwrap();
        store
            .record_search_at(id, "KÖLN", "Rome", Utc::now())
            .unwrap();

        let page = store.list_history(id, 1, 20).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.entries[0].from, "Köln");
    }

    #[test]
    fn test_duplicate_after_window_appends() {
        let (store, id) = seeded();
        let first = Utc::now() - Duration::minutes(61);
        store.record_search_at(id, "Paris", "Rome", first).unwrap();
        store
            .record_search_at(id, "Paris", "Rome", Utc::now())
            .unwrap();

        let page = store.list_history(id, 1, 20).unwrap();
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_history_caps_at_fifty_evicting_oldest() {
        let (store, id) = seeded();
        let start = Utc::now() - Duration::minutes(200);
        for i in 0..51i64 {
            store
                .record_search_at(
                    id,
                    &format!("From {i}"),
                    "Rome",
                    start + Duration::minutes(i),
                )
                .unwrap();
        }

        let page = store.list_history(id, 1, 60).unwrap();
        assert_eq!(page.total, 50);
        assert!(page.entries.iter().all(|e| e.from != "From 0"));
        assert_eq!(page.entries[0].from, "From 50");
    }

    #[test]
    fn test_listing_sorts_newest_first_regardless_of_insertion() {
        let (store, id) = seeded();
        let base = Utc::now() - Duration::minutes(90);
        store.record_search_at(id, "Paris", "Rome", base).unwrap();
        store
            .record_search_at(id, "Berlin", "Prague", base + Duration::minutes(5))
            .unwrap();
        // Refreshing the first entry makes storage order non-chronological.
        store
            .record_search_at(id, "Paris", "Rome", base + Duration::minutes(50))
            .unwrap();

        let page = store.list_history(id, 1, 20).unwrap();
        let routes: Vec<_> = page.entries.iter().map(|e| e.from.as_str()).collect();
        assert_eq!(routes, vec!["Paris", "Berlin"]);
    }

    #[test]
    fn test_pagination_is_one_indexed() {
        let (store, id) = seeded();
        let base = Utc::now() - Duration::hours(30);
        for i in 0..5i64 {
            store
                .record_search_at(id, &format!("From {i}"), "Rome", base + Duration::hours(i))
                .unwrap();
        }
        let page = store.list_history(id, 2, 2).unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[0].from, "From 2");
    }

    #[test]
    fn test_delete_absent_entry_is_silent() {
        let (store, id) = seeded();
        store.record_search(id, "Paris", "Rome").unwrap();
        store.delete_history_entry(id, Uuid::new_v4()).unwrap();
        assert_eq!(store.list_history(id, 1, 20).unwrap().total, 1);
    }

    #[test]
    fn test_delete_removes_exactly_one_entry() {
        let (store, id) = seeded();
        store.record_search(id, "Paris", "Rome").unwrap();
        store.record_search(id, "Berlin", "Prague").unwrap();
        let entry_id = store.list_history(id, 1, 20).unwrap().entries[0].id;
        store.delete_history_entry(id, entry_id).unwrap();

        let page = store.list_history(id, 1, 20).unwrap();
        assert_eq!(page.total, 1);
        assert!(page.entries.iter().all(|e| e.id != entry_id));
    }

    #[test]
    fn test_clear_empties_history() {
        let (store, id) = seeded();
        store.record_search(id, "Paris", "Rome").unwrap();
        store.clear_history(id).unwrap();
        assert_eq!(store.list_history(id, 1, 20).unwrap().total, 0);
    }

    #[test]
    fn test_unknown_user_is_not_found() {
        let (store, _) = seeded();
        let missing = Uuid::new_v4();
        assert!(matches!(
            store.record_search(missing, "a", "b").unwrap_err(),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            store.list_history(missing, 1, 20).unwrap_err(),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            store.statistics(missing).unwrap_err(),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn test_statistics_rank_favorite_routes_by_count() {
        let (store, id) = seeded();
        let base = Utc::now() - Duration::hours(10);
        store.record_search_at(id, "Berlin", "Prague", base).unwrap();
        for i in 0..3i64 {
            store
                .record_search_at(id, "Paris", "Rome", base + Duration::hours((i + 1) * 2))
                .unwrap();
        }

        let stats = store.statistics(id).unwrap();
        assert_eq!(stats.total_searches, 4);
        assert_eq!(stats.favorite_routes[0].route, "Paris → Rome");
        assert_eq!(stats.favorite_routes[0].count, 3);
        assert_eq!(stats.favorite_routes[1].route, "Berlin → Prague");
    }

    #[test]
    fn test_statistics_recent_window_and_account_age() {
        let (store, id) = seeded();
        let now = Utc::now();
        store
            .record_search_at(id, "Old", "Trip", now - Duration::days(40))
            .unwrap();
        store
            .record_search_at(id, "New", "Trip", now - Duration::days(2))
            .unwrap();

        let stats = store.statistics_at(id, now).unwrap();
        assert_eq!(stats.total_searches, 2);
        assert_eq!(stats.recent_searches, 1);
        assert_eq!(stats.account_age_days, 100);
    }

    #[test]
    fn test_update_preferences_keeps_absent_fields() {
        let (store, id) = seeded();
        let updated = store
            .update_preferences(
                id,
                &PreferencesUpdateRequest {
                    travel_style: Some(TravelStyle::Luxury),
                    preferred_transport: None,
                },
            )
            .unwrap();
        assert_eq!(updated.travel_style, TravelStyle::Luxury);
        assert!(updated.preferred_transport.is_empty());
    }
}

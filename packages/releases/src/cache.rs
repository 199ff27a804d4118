//! Client-side query cache.
//!
//! Entries are JSON row lists keyed by table and optional filter. Writes are
//! never merged: a mutation invalidates the whole table and the next read
//! refetches. Each table carries an epoch that [`QueryCache::invalidate`] bumps;
//! a fetch remembers the epoch it started under and its result is dropped if
//! the table was invalidated while it was in flight.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::backend::{Filter, Table};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub table: Table,
    pub filter: Option<Filter>,
}

impl QueryKey {
    pub fn table(table: Table) -> Self {
        Self { table, filter: None }
    }

    pub fn filtered(table: Table, filter: Filter) -> Self {
        Self {
            table,
            filter: Some(filter),
        }
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<QueryKey, Vec<Value>>,
    epochs: HashMap<Table, u64>,
}

/// Shared, clonable cache handle.
#[derive(Clone, Debug, Default)]
pub struct QueryCache {
    inner: Arc<Mutex<CacheInner>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &QueryKey) -> Option<Vec<Value>> {
        self.lock().entries.get(key).cloned()
    }

    /// Current epoch for `table`. Record this before starting a fetch.
    pub fn epoch(&self, table: Table) -> u64 {
        self.lock().epochs.get(&table).copied().unwrap_or(0)
    }

    /// Store a fetch result if `table` has not been invalidated since `epoch`.
    ///
    /// Returns whether the rows were stored. Among fetches started under the
    /// same epoch, the last one to complete wins.
    pub fn store(&self, key: QueryKey, rows: Vec<Value>, epoch: u64) -> bool {
        let mut inner = self.lock();
        let current = inner.epochs.get(&key.table).copied().unwrap_or(0);
        if current != epoch {
            tracing::debug!(table = %key.table, epoch, current, "discarding stale fetch");
            return false;
        }
        inner.entries.insert(key, rows);
        true
    }

    /// Drop every entry for `table` and bump its epoch.
    pub fn invalidate(&self, table: Table) {
        let mut inner = self.lock();
        inner.entries.retain(|key, _| key.table != table);
        *inner.epochs.entry(table).or_insert(0) += 1;
        tracing::debug!(%table, "invalidated");
    }

    /// Drop every entry and bump every table's epoch, so no fetch started
    /// before the call is stored.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        for table in Table::ALL {
            *inner.epochs.entry(table).or_insert(0) += 1;
        }
        tracing::debug!("cleared");
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_and_get() {
        let cache = QueryCache::new();
        let key = QueryKey::table(Table::Modules);
        assert!(cache.get(&key).is_none());

        let epoch = cache.epoch(Table::Modules);
        assert!(cache.store(key.clone(), vec![json!({"id": "m1"})], epoch));
        assert_eq!(cache.get(&key).unwrap().len(), 1);
    }

    #[test]
    fn test_fetch_started_before_invalidation_is_discarded() {
        let cache = QueryCache::new();
        let key = QueryKey::table(Table::Clients);

        let epoch = cache.epoch(Table::Clients);
        cache.invalidate(Table::Clients);
        assert!(!cache.store(key.clone(), vec![json!({"id": "stale"})], epoch));
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_last_response_wins_within_epoch() {
        let cache = QueryCache::new();
        let key = QueryKey::table(Table::Versions);
        let epoch = cache.epoch(Table::Versions);

        cache.store(key.clone(), vec![json!({"id": "first"})], epoch);
        cache.store(key.clone(), vec![json!({"id": "second"})], epoch);
        assert_eq!(cache.get(&key).unwrap()[0]["id"], "second");
    }

    #[test]
    fn test_invalidate_only_touches_one_table() {
        let cache = QueryCache::new();
        let versions = QueryKey::filtered(Table::Versions, Filter::eq("module_id", "m1"));
        let modules = QueryKey::table(Table::Modules);

        cache.store(versions.clone(), vec![], cache.epoch(Table::Versions));
        cache.store(modules.clone(), vec![], cache.epoch(Table::Modules));
        assert_eq!(cache.len(), 2);

        cache.invalidate(Table::Versions);
        assert!(cache.get(&versions).is_none());
        assert!(cache.get(&modules).is_some());
        assert_eq!(cache.epoch(Table::Versions), 1);
        assert_eq!(cache.epoch(Table::Modules), 0);
    }

    #[test]
    fn test_clear_empties_everything() {
        let cache = QueryCache::new();
        cache.store(QueryKey::table(Table::Modules), vec![], 0);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.epoch(Table::Modules), 1);
    }

    #[test]
    fn test_clear_discards_fetch_for_uncached_table() {
        let cache = QueryCache::new();
        let key = QueryKey::table(Table::Clients);

        let epoch = cache.epoch(Table::Clients);
        cache.clear();
        assert!(!cache.store(key.clone(), vec![json!({"id": "stale"})], epoch));
        assert!(cache.get(&key).is_none());
        assert_eq!(cache.epoch(Table::Versions), 1);
    }
}

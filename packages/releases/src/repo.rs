//! # Releases: cached, typed data access over a [`TableClient`]
//!
//! [`Releases`] is what the UI's data hooks call. It turns typed [`Entity`]
//! operations into table-level backend calls and keeps a [`QueryCache`] of the
//! results.
//!
//! ## Read path
//!
//! [`list`](Releases::list) and [`list_where`](Releases::list_where) answer from
//! the cache when an entry exists. Otherwise they record the table's epoch,
//! fetch, and store the rows only if no mutation invalidated the table in the
//! meantime. [`get`](Releases::get) always goes to the backend.
//!
//! ## Write path
//!
//! Every mutation validates its draft locally first (invalid drafts never reach
//! the backend), performs the call, then invalidates the entity's table and its
//! [`dependents`](Table::dependents). Nothing is patched into the cache; the
//! next read refetches.

use serde_json::Value;

use crate::backend::{Filter, Table, TableClient};
use crate::cache::{QueryCache, QueryKey};
use crate::error::BackendError;
use crate::models::Entity;

#[derive(Clone, Debug)]
pub struct Releases<C: TableClient> {
    client: C,
    cache: QueryCache,
}

impl<C: TableClient> Releases<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            cache: QueryCache::new(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// All records of `E`, in backend order.
    pub async fn list<E: Entity>(&self) -> Result<Vec<E>, BackendError> {
        self.fetch(QueryKey::table(E::TABLE)).await
    }

    /// Records of `E` matching `filter`.
    pub async fn list_where<E: Entity>(&self, filter: Filter) -> Result<Vec<E>, BackendError> {
        self.fetch(QueryKey::filtered(E::TABLE, filter)).await
    }

    async fn fetch<E: Entity>(&self, key: QueryKey) -> Result<Vec<E>, BackendError> {
        let rows = match self.cache.get(&key) {
            Some(rows) => rows,
            None => {
                let epoch = self.cache.epoch(key.table);
                tracing::debug!(table = %key.table, filter = ?key.filter, "fetching");
                let rows = self.client.select(key.table, key.filter.as_ref()).await?;
                self.cache.store(key, rows.clone(), epoch);
                rows
            }
        };
        decode_rows(rows)
    }

    /// A single record by id.
    pub async fn get<E: Entity>(&self, id: &str) -> Result<E, BackendError> {
        let filter = Filter::eq("id", id);
        let row = self
            .client
            .select(E::TABLE, Some(&filter))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound {
                table: E::TABLE,
                id: id.to_string(),
            })?;
        Ok(serde_json::from_value(row)?)
    }

    pub async fn create<E: Entity>(&self, draft: &E::Draft) -> Result<E, BackendError> {
        let draft = E::validate(draft)?;
        let row = self
            .client
            .insert(E::TABLE, serde_json::to_value(&draft)?)
            .await?;
        self.invalidate(E::TABLE);
        Ok(serde_json::from_value(row)?)
    }

    pub async fn update<E: Entity>(&self, id: &str, draft: &E::Draft) -> Result<E, BackendError> {
        let draft = E::validate(draft)?;
        let row = self
            .client
            .update(E::TABLE, id, serde_json::to_value(&draft)?)
            .await?;
        self.invalidate(E::TABLE);
        Ok(serde_json::from_value(row)?)
    }

    pub async fn delete<E: Entity>(&self, id: &str) -> Result<(), BackendError> {
        let removed = self.delete_many::<E>(&[id.to_string()]).await?;
        if removed == 0 {
            return Err(BackendError::NotFound {
                table: E::TABLE,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Batch delete, as issued from a bulk selection. Empty input is a no-op.
    pub async fn delete_many<E: Entity>(&self, ids: &[String]) -> Result<u64, BackendError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let removed = self.client.delete(E::TABLE, ids).await?;
        tracing::debug!(table = %E::TABLE, requested = ids.len(), removed, "deleted");
        self.invalidate(E::TABLE);
        Ok(removed)
    }

    /// Invalidate `table` and every table that cascades from it.
    pub fn invalidate(&self, table: Table) {
        self.cache.invalidate(table);
        for dependent in table.dependents() {
            self.cache.invalidate(*dependent);
        }
    }

    /// Forget every cached query. Used when the signed-in user changes.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

fn decode_rows<E: Entity>(rows: Vec<Value>) -> Result<Vec<E>, BackendError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(BackendError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use crate::models::{Client, ClientDraft, Module, ModuleDraft, Version, VersionDraft};

    fn module_draft(name: &str) -> ModuleDraft {
        ModuleDraft {
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let releases = Releases::new(MemoryBackend::new());

        let created = releases.create::<Module>(&module_draft("  auth ")).await.unwrap();
        assert_eq!(created.name, "auth");

        let modules = releases.list::<Module>().await.unwrap();
        assert_eq!(modules, vec![created]);
    }

    #[tokio::test]
    async fn test_list_is_served_from_cache() {
        let backend = MemoryBackend::new();
        let releases = Releases::new(backend.clone());

        releases.list::<Client>().await.unwrap();
        releases.list::<Client>().await.unwrap();
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_mutation_invalidates_then_refetches() {
        let backend = MemoryBackend::new();
        let releases = Releases::new(backend.clone());

        assert!(releases.list::<Module>().await.unwrap().is_empty());
        releases.create::<Module>(&module_draft("billing")).await.unwrap();

        let modules = releases.list::<Module>().await.unwrap();
        assert_eq!(modules.len(), 1);
        // select, insert, select
        assert_eq!(backend.calls(), 3);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_backend() {
        let backend = MemoryBackend::new();
        let releases = Releases::new(backend.clone());

        let err = releases.create::<Module>(&module_draft("   ")).await.unwrap_err();
        assert!(matches!(err, BackendError::Invalid(_)));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_update_and_get() {
        let releases = Releases::new(MemoryBackend::new());
        let client = releases
            .create::<Client>(&ClientDraft {
                name: "Acme".into(),
                contact_email: None,
                notes: None,
            })
            .await
            .unwrap();

        let mut draft = client.to_draft();
        draft.notes = Some("priority".into());
        let updated = releases.update::<Client>(&client.id, &draft).await.unwrap();
        assert_eq!(updated.notes.as_deref(), Some("priority"));

        let fetched = releases.get::<Client>(&client.id).await.unwrap();
        assert_eq!(fetched, updated);

        let missing = releases.get::<Client>("nope").await.unwrap_err();
        assert!(matches!(missing, BackendError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_many_empty_is_noop() {
        let backend = MemoryBackend::new();
        let releases = Releases::new(backend.clone());
        assert_eq!(releases.delete_many::<Module>(&[]).await.unwrap(), 0);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_reports_not_found() {
        let releases = Releases::new(MemoryBackend::new());
        let err = releases.delete::<Module>("ghost").await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_deleting_modules_invalidates_versions() {
        let releases = Releases::new(MemoryBackend::new());
        let module = releases.create::<Module>(&module_draft("core")).await.unwrap();
        releases
            .create::<Version>(&VersionDraft {
                module_id: module.id.clone(),
                version_number: "1.0.0".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let by_module = Filter::eq("module_id", module.id.clone());
        assert_eq!(releases.list_where::<Version>(by_module.clone()).await.unwrap().len(), 1);
        assert_eq!(releases.list::<Version>().await.unwrap().len(), 1);

        releases.delete_many::<Module>(&[module.id.clone()]).await.unwrap();
        assert!(releases.list::<Version>().await.unwrap().is_empty());
        assert!(releases.list_where::<Version>(by_module).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backend_error_propagates_and_is_not_cached() {
        let backend = MemoryBackend::new();
        let releases = Releases::new(backend.clone());

        backend.fail_next(BackendError::Network("timeout".into()));
        let err = releases.list::<Module>().await.unwrap_err();
        assert_eq!(err, BackendError::Network("timeout".into()));
        assert!(releases.cache().is_empty());

        assert!(releases.list::<Module>().await.is_ok());
    }

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let backend = MemoryBackend::new();
        let releases = Releases::new(backend.clone());

        releases.list::<Client>().await.unwrap();
        releases.clear_cache();
        assert!(releases.cache().is_empty());

        releases.list::<Client>().await.unwrap();
        assert_eq!(backend.calls(), 2);
    }
}

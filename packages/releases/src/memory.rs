use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde_json::{Map, Value};

use crate::backend::{AuthClient, Filter, Table, TableClient};
use crate::error::BackendError;
use crate::models::UserInfo;

#[derive(Debug, Default)]
struct MemoryState {
    tables: HashMap<Table, Vec<Value>>,
    next_id: u64,
    user: Option<UserInfo>,
    fail_next: Option<BackendError>,
    calls: usize,
}

/// In-memory backend for tests and offline demos.
///
/// Mirrors the server's behaviour where it matters to callers: generated `id`
/// and `created_at` on insert, cascading deletes from modules to versions, and
/// rows returned in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with a signed-in user.
    pub fn with_user(user: UserInfo) -> Self {
        let backend = Self::new();
        backend.lock().user = Some(user);
        backend
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next backend call fail with `err`.
    pub fn fail_next(&self, err: BackendError) {
        self.lock().fail_next = Some(err);
    }

    /// Total number of calls made through either trait.
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    pub fn rows(&self, table: Table) -> Vec<Value> {
        self.lock().tables.get(&table).cloned().unwrap_or_default()
    }

    /// Begin a call: count it and surface an injected failure.
    fn enter(&self) -> Result<MutexGuard<'_, MemoryState>, BackendError> {
        let mut state = self.lock();
        state.calls += 1;
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

fn row_id(row: &Value) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

fn as_object(row: Value) -> Result<Map<String, Value>, BackendError> {
    match row {
        Value::Object(map) => Ok(map),
        other => Err(BackendError::Invalid(format!("expected an object row, got {other}"))),
    }
}

impl TableClient for MemoryBackend {
    async fn select(&self, table: Table, filter: Option<&Filter>) -> Result<Vec<Value>, BackendError> {
        let state = self.enter()?;
        let rows = state.tables.get(&table).map(Vec::as_slice).unwrap_or(&[]);
        Ok(rows
            .iter()
            .filter(|row| filter.map_or(true, |f| f.matches(row)))
            .cloned()
            .collect())
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Value, BackendError> {
        let mut state = self.enter()?;
        let mut map = as_object(row)?;
        state.next_id += 1;
        let id = format!("{}-{}", table.name(), state.next_id);
        map.insert("id".into(), Value::String(id));
        map.insert("created_at".into(), Value::String(Utc::now().to_rfc3339()));
        let row = Value::Object(map);
        state.tables.entry(table).or_default().push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: Table, id: &str, row: Value) -> Result<Value, BackendError> {
        let mut state = self.enter()?;
        let patch = as_object(row)?;
        let existing = state
            .tables
            .get_mut(&table)
            .and_then(|rows| rows.iter_mut().find(|r| row_id(r) == Some(id)))
            .ok_or_else(|| BackendError::NotFound {
                table,
                id: id.to_string(),
            })?;
        if let Value::Object(fields) = existing {
            for (key, value) in patch {
                if key != "id" && key != "created_at" {
                    fields.insert(key, value);
                }
            }
        }
        Ok(existing.clone())
    }

    async fn delete(&self, table: Table, ids: &[String]) -> Result<u64, BackendError> {
        let mut state = self.enter()?;
        let rows = state.tables.entry(table).or_default();
        let before = rows.len();
        rows.retain(|r| !row_id(r).is_some_and(|id| ids.iter().any(|d| d == id)));
        let removed = (before - rows.len()) as u64;

        for dependent in table.dependents() {
            if let Some(rows) = state.tables.get_mut(dependent) {
                rows.retain(|r| {
                    !r.get("module_id")
                        .and_then(Value::as_str)
                        .is_some_and(|parent| ids.iter().any(|d| d == parent))
                });
            }
        }
        Ok(removed)
    }
}

impl AuthClient for MemoryBackend {
    async fn get_user(&self) -> Result<Option<UserInfo>, BackendError> {
        let state = self.enter()?;
        Ok(state.user.clone())
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let mut state = self.enter()?;
        state.user = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_generates_id_and_timestamp() {
        let backend = MemoryBackend::new();
        let row = backend
            .insert(Table::Modules, json!({ "name": "core" }))
            .await
            .unwrap();
        assert_eq!(row["id"], "modules-1");
        assert!(row["created_at"].is_string());
        assert_eq!(backend.rows(Table::Modules).len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let backend = MemoryBackend::new();
        let row = backend
            .insert(Table::Clients, json!({ "name": "Acme", "notes": "x" }))
            .await
            .unwrap();
        let id = row["id"].as_str().unwrap();

        let updated = backend
            .update(Table::Clients, id, json!({ "notes": "y", "id": "hijack" }))
            .await
            .unwrap();
        assert_eq!(updated["name"], "Acme");
        assert_eq!(updated["notes"], "y");
        assert_eq!(updated["id"], id);

        let missing = backend.update(Table::Clients, "nope", json!({})).await;
        assert!(matches!(missing, Err(BackendError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_deleting_module_cascades_to_versions() {
        let backend = MemoryBackend::new();
        let m1 = backend.insert(Table::Modules, json!({ "name": "a" })).await.unwrap();
        let m2 = backend.insert(Table::Modules, json!({ "name": "b" })).await.unwrap();
        let m1_id = m1["id"].as_str().unwrap().to_string();
        let m2_id = m2["id"].as_str().unwrap().to_string();
        backend
            .insert(Table::Versions, json!({ "module_id": m1_id, "version_number": "1" }))
            .await
            .unwrap();
        backend
            .insert(Table::Versions, json!({ "module_id": m2_id, "version_number": "1" }))
            .await
            .unwrap();

        let removed = backend.delete(Table::Modules, &[m1_id]).await.unwrap();
        assert_eq!(removed, 1);
        let versions = backend.rows(Table::Versions);
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0]["module_id"], m2_id.as_str());
    }

    #[tokio::test]
    async fn test_fail_next_fails_once() {
        let backend = MemoryBackend::new();
        backend.fail_next(BackendError::Network("offline".into()));
        assert!(backend.select(Table::Modules, None).await.is_err());
        assert!(backend.select(Table::Modules, None).await.is_ok());
        assert_eq!(backend.calls(), 2);
    }
}

//! # Backend boundary
//!
//! The dashboard talks to its backend through two small async traits:
//!
//! - [`TableClient`]: table-oriented `select` / `insert` / `update` / `delete`
//!   over JSON rows. In the browser this is implemented by server functions; in
//!   tests by [`crate::MemoryBackend`].
//! - [`AuthClient`]: `get_user` / `sign_out` for the session context. Change
//!   notifications are provided by [`crate::Session`] itself.
//!
//! Rows are plain JSON objects. Typed access lives one layer up in
//! [`crate::Releases`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BackendError;
use crate::models::UserInfo;

/// Backend tables the dashboard reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Modules,
    Clients,
    Versions,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Modules, Table::Clients, Table::Versions];

    pub fn name(self) -> &'static str {
        match self {
            Table::Modules => "modules",
            Table::Clients => "clients",
            Table::Versions => "versions",
        }
    }

    /// Tables whose rows are removed when rows of this table are deleted.
    pub fn dependents(self) -> &'static [Table] {
        match self {
            Table::Modules => &[Table::Versions],
            Table::Clients | Table::Versions => &[],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Equality filter on a single column.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Whether a JSON row satisfies this filter.
    pub fn matches(&self, row: &Value) -> bool {
        match row.get(&self.column) {
            Some(Value::String(s)) => *s == self.value,
            Some(Value::Null) | None => false,
            Some(other) => other.to_string() == self.value,
        }
    }
}

/// Async table-oriented query and mutation interface.
pub trait TableClient {
    fn select(
        &self,
        table: Table,
        filter: Option<&Filter>,
    ) -> impl std::future::Future<Output = Result<Vec<Value>, BackendError>>;

    /// Insert a row and return it as stored, with generated fields filled in.
    fn insert(
        &self,
        table: Table,
        row: Value,
    ) -> impl std::future::Future<Output = Result<Value, BackendError>>;

    /// Overwrite the fields present in `row` and return the updated row.
    fn update(
        &self,
        table: Table,
        id: &str,
        row: Value,
    ) -> impl std::future::Future<Output = Result<Value, BackendError>>;

    /// Delete rows by id, returning how many were removed.
    fn delete(
        &self,
        table: Table,
        ids: &[String],
    ) -> impl std::future::Future<Output = Result<u64, BackendError>>;
}

/// Async auth interface consumed by [`crate::Session`].
pub trait AuthClient {
    fn get_user(&self) -> impl std::future::Future<Output = Result<Option<UserInfo>, BackendError>>;

    fn sign_out(&self) -> impl std::future::Future<Output = Result<(), BackendError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_matches_string_and_scalar_columns() {
        let row = json!({ "id": "v1", "module_id": "m1", "build": 42, "notes": null });
        assert!(Filter::eq("module_id", "m1").matches(&row));
        assert!(!Filter::eq("module_id", "m2").matches(&row));
        assert!(Filter::eq("build", "42").matches(&row));
        assert!(!Filter::eq("notes", "null").matches(&row));
        assert!(!Filter::eq("missing", "x").matches(&row));
    }

    #[test]
    fn test_only_modules_have_dependents() {
        assert_eq!(Table::Modules.dependents(), &[Table::Versions]);
        assert!(Table::Clients.dependents().is_empty());
        assert!(Table::Versions.dependents().is_empty());
    }

    #[test]
    fn test_table_serializes_as_name() {
        for table in Table::ALL {
            assert_eq!(
                serde_json::to_value(table).unwrap(),
                Value::String(table.name().to_string())
            );
        }
    }
}

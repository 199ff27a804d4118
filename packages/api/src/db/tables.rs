//! # Row queries for the dashboard tables
//!
//! Rows travel as JSON objects. Reads use Postgres' `to_json` so the column
//! names of the table become the keys the client deserializes:
//!
//! ```sql
//! SELECT to_json(t) FROM modules t ORDER BY t.created_at
//! ```
//!
//! Writes deserialize the incoming row into the table's draft type and run it
//! through the same [`Entity::validate`] the client uses, so a row that skips
//! the client never bypasses validation.
//!
//! Table names come from the closed [`Table`] enum and filter columns from
//! [`filter_column`]; nothing the client sends is spliced into SQL.

use releases::{Client, ClientDraft, Entity, Filter, Module, ModuleDraft, Table, Version, VersionDraft};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;

/// Columns a client may filter on.
pub fn filter_column(table: Table, column: &str) -> Result<&'static str, ApiError> {
    match (table, column) {
        (_, "id") => Ok("id"),
        (Table::Versions, "module_id") => Ok("module_id"),
        _ => Err(ApiError::InvalidInput(format!(
            "cannot filter {table} by {column}"
        ))),
    }
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Ok(Uuid::parse_str(id.trim())?)
}

pub async fn select(pool: &PgPool, table: Table, filter: Option<&Filter>) -> Result<Vec<Value>, ApiError> {
    let rows = match filter {
        None => {
            let sql = format!(
                "SELECT to_json(t) FROM {table} t ORDER BY t.created_at",
                table = table.name()
            );
            sqlx::query_scalar::<_, Value>(&sql).fetch_all(pool).await?
        }
        Some(filter) => {
            let column = filter_column(table, &filter.column)?;
            let sql = format!(
                "SELECT to_json(t) FROM {table} t WHERE t.{column} = $1 ORDER BY t.created_at",
                table = table.name()
            );
            sqlx::query_scalar::<_, Value>(&sql)
                .bind(parse_id(&filter.value)?)
                .fetch_all(pool)
                .await?
        }
    };
    tracing::debug!(%table, rows = rows.len(), "selected");
    Ok(rows)
}

pub async fn insert(pool: &PgPool, table: Table, row: Value) -> Result<Value, ApiError> {
    let inserted = match table {
        Table::Modules => {
            let draft = Module::validate(&serde_json::from_value::<ModuleDraft>(row)?)?;
            sqlx::query_scalar::<_, Value>(
                "WITH row AS (
                    INSERT INTO modules (name, description) VALUES ($1, $2) RETURNING *
                 ) SELECT to_json(row) FROM row",
            )
            .bind(&draft.name)
            .bind(&draft.description)
            .fetch_one(pool)
            .await?
        }
        Table::Clients => {
            let draft = Client::validate(&serde_json::from_value::<ClientDraft>(row)?)?;
            sqlx::query_scalar::<_, Value>(
                "WITH row AS (
                    INSERT INTO clients (name, contact_email, notes) VALUES ($1, $2, $3) RETURNING *
                 ) SELECT to_json(row) FROM row",
            )
            .bind(&draft.name)
            .bind(&draft.contact_email)
            .bind(&draft.notes)
            .fetch_one(pool)
            .await?
        }
        Table::Versions => {
            let draft = Version::validate(&serde_json::from_value::<VersionDraft>(row)?)?;
            sqlx::query_scalar::<_, Value>(
                "WITH row AS (
                    INSERT INTO versions (module_id, version_number, release_date, notes)
                    VALUES ($1, $2, $3, $4) RETURNING *
                 ) SELECT to_json(row) FROM row",
            )
            .bind(parse_id(&draft.module_id)?)
            .bind(&draft.version_number)
            .bind(draft.release_date)
            .bind(&draft.notes)
            .fetch_one(pool)
            .await
            .map_err(missing_module)?
        }
    };
    tracing::info!(%table, "inserted row");
    Ok(inserted)
}

pub async fn update(pool: &PgPool, table: Table, id: &str, row: Value) -> Result<Value, ApiError> {
    let uuid = parse_id(id)?;
    let updated = match table {
        Table::Modules => {
            let draft = Module::validate(&serde_json::from_value::<ModuleDraft>(row)?)?;
            sqlx::query_scalar::<_, Value>(
                "WITH row AS (
                    UPDATE modules SET name = $2, description = $3 WHERE id = $1 RETURNING *
                 ) SELECT to_json(row) FROM row",
            )
            .bind(uuid)
            .bind(&draft.name)
            .bind(&draft.description)
            .fetch_optional(pool)
            .await?
        }
        Table::Clients => {
            let draft = Client::validate(&serde_json::from_value::<ClientDraft>(row)?)?;
            sqlx::query_scalar::<_, Value>(
                "WITH row AS (
                    UPDATE clients SET name = $2, contact_email = $3, notes = $4
                    WHERE id = $1 RETURNING *
                 ) SELECT to_json(row) FROM row",
            )
            .bind(uuid)
            .bind(&draft.name)
            .bind(&draft.contact_email)
            .bind(&draft.notes)
            .fetch_optional(pool)
            .await?
        }
        Table::Versions => {
            let draft = Version::validate(&serde_json::from_value::<VersionDraft>(row)?)?;
            sqlx::query_scalar::<_, Value>(
                "WITH row AS (
                    UPDATE versions
                    SET module_id = $2, version_number = $3, release_date = $4, notes = $5
                    WHERE id = $1 RETURNING *
                 ) SELECT to_json(row) FROM row",
            )
            .bind(uuid)
            .bind(parse_id(&draft.module_id)?)
            .bind(&draft.version_number)
            .bind(draft.release_date)
            .bind(&draft.notes)
            .fetch_optional(pool)
            .await
            .map_err(missing_module)?
        }
    };
    updated.ok_or_else(|| ApiError::NotFound(format!("{table} record {id}")))
}

/// Delete rows by id. Versions of a deleted module go with it (`ON DELETE CASCADE`).
pub async fn delete(pool: &PgPool, table: Table, ids: &[String]) -> Result<u64, ApiError> {
    let ids = ids
        .iter()
        .map(|id| parse_id(id))
        .collect::<Result<Vec<_>, _>>()?;
    if ids.is_empty() {
        return Ok(0);
    }
    let sql = format!("DELETE FROM {table} WHERE id = ANY($1)", table = table.name());
    let removed = sqlx::query(&sql).bind(&ids).execute(pool).await?.rows_affected();
    tracing::info!(%table, requested = ids.len(), removed, "deleted rows");
    Ok(removed)
}

fn missing_module(err: sqlx::Error) -> ApiError {
    match err {
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
            ApiError::InvalidInput("Module does not exist".into())
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_columns_are_whitelisted() {
        for table in Table::ALL {
            assert_eq!(filter_column(table, "id").unwrap(), "id");
        }
        assert_eq!(filter_column(Table::Versions, "module_id").unwrap(), "module_id");
        assert!(filter_column(Table::Modules, "module_id").is_err());
        assert!(filter_column(Table::Clients, "name; DROP TABLE clients").is_err());
    }

    #[test]
    fn test_ids_must_be_uuids() {
        assert!(parse_id(" 67e55044-10b1-426f-9247-bb680e5fe0c8 ").is_ok());
        assert!(matches!(parse_id("m1"), Err(ApiError::InvalidInput(_))));
    }
}

//! # API crate: fullstack server functions for the release dashboard
//!
//! Every function the `ui` crate calls over the network is defined here. Each
//! one is annotated with `#[get(...)]` or `#[post(...)]` and compiled twice:
//! with the full server logic behind `#[cfg(feature = "server")]`, and as a
//! thin client stub that forwards the call over HTTP.
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | - | Password hashing, session keys and permission checks |
//! | [`db`] | - | PostgreSQL pool and the row queries |
//! | [`error`] | `server` | [`error::ApiError`] and its conversion to `ServerFnError` |
//! | [`models`] | - | The `users` row |
//! | [`settings`] | `server` | Layered server configuration |
//!
//! ## Server functions
//!
//! - **Authentication**: `get_current_user`, `login_password`, `register`, `logout`
//! - **Rows**: `select_rows`, `insert_row`, `update_row`, `delete_rows`
//! - **Administration**: `list_users`, `get_dashboard_config`
//!
//! Row functions re-check the caller's role with [`releases::Permissions`].

use dioxus::prelude::*;
use serde_json::Value;

pub mod auth;
pub mod db;
#[cfg(feature = "server")]
pub mod error;
pub mod models;
#[cfg(feature = "server")]
pub mod settings;

pub use releases::{DashboardConfig, Filter, Table, UserInfo};

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    let user = auth::current_user(&session).await?;
    Ok(user.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login-password", session: tower_sessions::Session)]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::error::ApiError;

    let email = email.trim().to_lowercase();
    let pool = get_pool().await.map_err(ApiError::from)?;

    let user: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(ApiError::from)?;

    let Some(user) = user else {
        return Err(ApiError::InvalidCredentials.into());
    };

    if !auth::verify_password(&password, &user.password_hash)? {
        tracing::info!(%email, "rejected login");
        return Err(ApiError::InvalidCredentials.into());
    }

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(ApiError::from)?;

    tracing::info!(user = %user.id, "signed in");
    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login-password")]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Register a new account. It has no role until an administrator assigns one.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn register(email: String, password: String, name: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::error::ApiError;

    let email = email.trim().to_lowercase();
    let name = name.trim().to_string();

    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::InvalidInput("Invalid email address".into()).into());
    }
    if name.is_empty() {
        return Err(ApiError::InvalidInput("Name is required".into()).into());
    }
    let password_hash = auth::hash_password(&password)?;

    let pool = get_pool().await.map_err(ApiError::from)?;

    let existing: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(ApiError::from)?;
    if existing.is_some() {
        return Err(ApiError::InvalidInput("An account with this email already exists".into()).into());
    }

    let user: models::User = sqlx::query_as(
        "INSERT INTO users (email, name, password_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&email)
    .bind(&name)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(ApiError::from)?;

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(ApiError::from)?;

    tracing::info!(user = %user.id, "registered");
    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(email: String, password: String, name: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session.flush().await.map_err(error::ApiError::from)?;
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Rows of `table`, optionally filtered by one column.
#[cfg(feature = "server")]
#[post("/api/rows/select", session: tower_sessions::Session)]
pub async fn select_rows(table: Table, filter: Option<Filter>) -> Result<Vec<Value>, ServerFnError> {
    auth::require_reader(&session).await?;
    let pool = db::get_pool().await.map_err(error::ApiError::from)?;
    Ok(db::tables::select(pool, table, filter.as_ref()).await?)
}

#[cfg(not(feature = "server"))]
#[post("/api/rows/select")]
pub async fn select_rows(table: Table, filter: Option<Filter>) -> Result<Vec<Value>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/rows/insert", session: tower_sessions::Session)]
pub async fn insert_row(table: Table, row: Value) -> Result<Value, ServerFnError> {
    auth::require_capability(&session, releases::Capability::Create).await?;
    let pool = db::get_pool().await.map_err(error::ApiError::from)?;
    Ok(db::tables::insert(pool, table, row).await?)
}

#[cfg(not(feature = "server"))]
#[post("/api/rows/insert")]
pub async fn insert_row(table: Table, row: Value) -> Result<Value, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/rows/update", session: tower_sessions::Session)]
pub async fn update_row(table: Table, id: String, row: Value) -> Result<Value, ServerFnError> {
    auth::require_capability(&session, releases::Capability::Edit).await?;
    let pool = db::get_pool().await.map_err(error::ApiError::from)?;
    Ok(db::tables::update(pool, table, &id, row).await?)
}

#[cfg(not(feature = "server"))]
#[post("/api/rows/update")]
pub async fn update_row(table: Table, id: String, row: Value) -> Result<Value, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete rows by id, returning how many were removed.
#[cfg(feature = "server")]
#[post("/api/rows/delete", session: tower_sessions::Session)]
pub async fn delete_rows(table: Table, ids: Vec<String>) -> Result<u64, ServerFnError> {
    auth::require_capability(&session, releases::Capability::Delete).await?;
    let pool = db::get_pool().await.map_err(error::ApiError::from)?;
    Ok(db::tables::delete(pool, table, &ids).await?)
}

#[cfg(not(feature = "server"))]
#[post("/api/rows/delete")]
pub async fn delete_rows(table: Table, ids: Vec<String>) -> Result<u64, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// All accounts, oldest first. Administrators only.
#[cfg(feature = "server")]
#[get("/api/users", session: tower_sessions::Session)]
pub async fn list_users() -> Result<Vec<UserInfo>, ServerFnError> {
    use crate::error::ApiError;

    auth::require_admin(&session).await?;
    let pool = db::get_pool().await.map_err(ApiError::from)?;
    let users: Vec<models::User> = sqlx::query_as("SELECT * FROM users ORDER BY created_at")
        .fetch_all(pool)
        .await
        .map_err(ApiError::from)?;
    Ok(users.iter().map(models::User::to_info).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/users")]
pub async fn list_users() -> Result<Vec<UserInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// The `[dashboard]` section of the server settings.
#[cfg(feature = "server")]
#[get("/api/config")]
pub async fn get_dashboard_config() -> Result<DashboardConfig, ServerFnError> {
    Ok(settings::settings().dashboard.clone())
}

#[cfg(not(feature = "server"))]
#[get("/api/config")]
pub async fn get_dashboard_config() -> Result<DashboardConfig, ServerFnError> {
    Ok(DashboardConfig::default())
}

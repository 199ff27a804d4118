//! # Server-side permission checks
//!
//! Each row server function resolves the signed-in user from the session and
//! asks the shared [`Permissions`] resolver whether the action is allowed. The
//! UI hides controls with the same resolver, so a denial here means the client
//! held a stale role.

use releases::{Capability, Permissions, UserInfo};
use tower_sessions::Session;

use super::session::SESSION_USER_ID_KEY;
use crate::db::get_pool;
use crate::error::ApiError;
use crate::models::User;

/// The signed-in user, or `None` when the session carries no (valid) user id.
pub async fn current_user(session: &Session) -> Result<Option<User>, ApiError> {
    let user_id: Option<String> = session.get(SESSION_USER_ID_KEY).await?;
    let Some(user_id) = user_id else {
        return Ok(None);
    };
    let user_uuid = uuid::Uuid::parse_str(&user_id)?;

    let pool = get_pool().await?;
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_uuid)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

async fn require_user(session: &Session) -> Result<UserInfo, ApiError> {
    current_user(session)
        .await?
        .map(|user| user.to_info())
        .ok_or(ApiError::Unauthenticated)
}

/// Any signed-in user holding a role may read the dashboard tables.
pub async fn require_reader(session: &Session) -> Result<UserInfo, ApiError> {
    let user = require_user(session).await?;
    if Permissions::for_user(Some(&user)).role().is_none() {
        return Err(ApiError::Forbidden);
    }
    Ok(user)
}

pub async fn require_capability(session: &Session, capability: Capability) -> Result<UserInfo, ApiError> {
    let user = require_user(session).await?;
    if !Permissions::for_user(Some(&user)).allows(capability) {
        tracing::warn!(user = %user.id, ?capability, "denied");
        return Err(ApiError::Forbidden);
    }
    Ok(user)
}

pub async fn require_admin(session: &Session) -> Result<UserInfo, ApiError> {
    let user = require_user(session).await?;
    if !Permissions::for_user(Some(&user)).is_admin() {
        tracing::warn!(user = %user.id, "admin area denied");
        return Err(ApiError::Forbidden);
    }
    Ok(user)
}

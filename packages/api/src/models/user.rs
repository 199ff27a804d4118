//! # Dashboard accounts
//!
//! [`User`] is the complete `users` row. It derives [`sqlx::FromRow`] and is
//! never sent to the client: [`User::to_info`] projects it into the
//! client-safe [`UserInfo`], dropping the password hash and timestamps.
//!
//! The `role` column holds `admin`, `manager`, `viewer` or `NULL`. Any other
//! value is logged and treated as no role, so an unrecognised role grants
//! nothing.

use chrono::{DateTime, Utc};
use releases::{Role, UserInfo};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Option<Role> {
        let raw = self.role.as_deref()?;
        match raw.parse() {
            Ok(role) => Some(role),
            Err(e) => {
                tracing::warn!(user = %self.id, "ignoring stored role: {e}");
                None
            }
        }
    }

    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Option<&str>) -> User {
        User {
            id: Uuid::nil(),
            email: "ops@example.com".into(),
            name: None,
            password_hash: String::new(),
            role: role.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_to_info_parses_role() {
        let info = user(Some("manager")).to_info();
        assert_eq!(info.role, Some(Role::Manager));
        assert_eq!(info.id, Uuid::nil().to_string());
    }

    #[test]
    fn test_unknown_or_missing_role_grants_nothing() {
        assert_eq!(user(Some("Admin")).to_info().role, None);
        assert_eq!(user(Some("owner")).to_info().role, None);
        assert_eq!(user(None).to_info().role, None);
    }
}

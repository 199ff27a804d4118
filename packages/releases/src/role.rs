//! Roles, menu keys and the fixed capability tables.
//!
//! Roles are assigned out-of-band and arrive from the backend as lowercase
//! strings. Parsing is case-sensitive: `"Admin"` is not a role. Everything past
//! parsing works on the enums, so every table below is an exhaustive `match`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capability tier assigned to a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Viewer,
}

/// A mutating action gated by role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Create,
    Edit,
    Delete,
}

/// Top-level navigation entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuKey {
    Dashboard,
    Modules,
    Clients,
    Versions,
    Reports,
    Users,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown menu key: {0:?}")]
pub struct UnknownMenuKey(pub String);

/// Menu entries visible to managers and viewers.
const STAFF_MENU: &[MenuKey] = &[
    MenuKey::Dashboard,
    MenuKey::Modules,
    MenuKey::Clients,
    MenuKey::Versions,
    MenuKey::Reports,
];

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Viewer];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Viewer => "viewer",
        }
    }

    /// Whether this role may perform `capability`.
    pub fn grants(self, capability: Capability) -> bool {
        match (self, capability) {
            (Role::Admin, _) => true,
            (Role::Manager, Capability::Create | Capability::Edit) => true,
            (Role::Manager, Capability::Delete) => false,
            (Role::Viewer, _) => false,
        }
    }

    /// Menu entries this role may navigate to, in display order.
    pub fn menu(self) -> &'static [MenuKey] {
        match self {
            Role::Admin => &MenuKey::ALL,
            Role::Manager | Role::Viewer => STAFF_MENU,
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "viewer" => Ok(Role::Viewer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MenuKey {
    pub const ALL: [MenuKey; 6] = [
        MenuKey::Dashboard,
        MenuKey::Modules,
        MenuKey::Clients,
        MenuKey::Versions,
        MenuKey::Reports,
        MenuKey::Users,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MenuKey::Dashboard => "dashboard",
            MenuKey::Modules => "modules",
            MenuKey::Clients => "clients",
            MenuKey::Versions => "versions",
            MenuKey::Reports => "reports",
            MenuKey::Users => "users",
        }
    }

    /// Human-readable label for navigation.
    pub fn label(self) -> &'static str {
        match self {
            MenuKey::Dashboard => "Dashboard",
            MenuKey::Modules => "Modules",
            MenuKey::Clients => "Clients",
            MenuKey::Versions => "Versions",
            MenuKey::Reports => "Reports",
            MenuKey::Users => "Users",
        }
    }
}

impl FromStr for MenuKey {
    type Err = UnknownMenuKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MenuKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownMenuKey(s.to_string()))
    }
}

impl fmt::Display for MenuKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_is_case_sensitive() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("manager".parse::<Role>(), Ok(Role::Manager));
        assert_eq!("viewer".parse::<Role>(), Ok(Role::Viewer));
        assert!("Admin".parse::<Role>().is_err());
        assert!("root".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_display_matches_wire_form() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
    }

    #[test]
    fn test_menu_key_parsing() {
        assert_eq!("versions".parse::<MenuKey>(), Ok(MenuKey::Versions));
        assert_eq!(
            "settings".parse::<MenuKey>(),
            Err(UnknownMenuKey("settings".to_string()))
        );
    }

    #[test]
    fn test_users_menu_is_admin_only() {
        assert!(Role::Admin.menu().contains(&MenuKey::Users));
        assert!(!Role::Manager.menu().contains(&MenuKey::Users));
        assert!(!Role::Viewer.menu().contains(&MenuKey::Users));
        assert_eq!(Role::Manager.menu(), Role::Viewer.menu());
    }
}

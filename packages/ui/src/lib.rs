//! This crate contains all shared UI for the release dashboard.
//!
//! Context is layered: [`AuthProvider`] supplies the session, [`DataProvider`]
//! the repository, dashboard config and notifications. Views under [`views`]
//! expect both above them.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

mod time;
pub use time::redirect;

mod auth;
pub use auth::{
    use_auth, use_permissions, use_session, ApiAuth, AuthProvider, AuthSession, LoginForm,
    LogoutButton, RegisterForm,
};

mod permissions;
pub use permissions::{AdminOnly, MenuGate, Protected};

mod selection;
pub use selection::{click_row, use_bulk_selection, BulkSelection};

pub mod data;
pub use data::{
    use_dashboard_config, use_entity_list, use_entity_mutations, use_entity_query, ApiTables,
    DataProvider, EntityMutations, Repository, Revision,
};

pub mod notifications;
pub use notifications::{notify, use_notifications, NoticeLevel, NotificationList, Notifications};

mod bulk_table;
pub use bulk_table::{BulkTable, TableRow};

mod release_notes;
pub use release_notes::{render_release_notes, ReleaseNotes};

mod sidebar;
pub use sidebar::AppSidebar;

pub mod views;

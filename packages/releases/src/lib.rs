//! # Releases: platform-neutral core of the release dashboard
//!
//! Everything in this crate compiles for both WASM and native targets and has no
//! UI or database dependency. The `ui` crate wraps these types in Dioxus signals
//! and the `api` crate reuses the permission resolver for server-side checks.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`role`] | `Role`, `MenuKey` and `Capability` enums with their fixed tables |
//! | [`permissions`] | [`Permissions`] resolver, fail-closed when no role is known |
//! | [`selection`] | [`Selection`] state machine backing bulk row selection |
//! | [`models`] | `Module`, `Client`, `Version`, their drafts and the [`Entity`] trait |
//! | [`backend`] | [`TableClient`] / [`AuthClient`] traits for the remote service |
//! | [`cache`] | [`QueryCache`] with per-table invalidation epochs |
//! | [`repo`] | [`Releases`], the cached data-access layer |
//! | [`session`] | [`Session`], the explicitly passed auth context |
//! | [`stats`] | [`DashboardStats`] summaries for the dashboard and reports |
//! | [`config`] | [`DashboardConfig`] loaded from `relboard.toml` |

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod liveness;
pub mod models;
pub mod permissions;
pub mod repo;
pub mod role;
pub mod selection;
pub mod session;
pub mod stats;

mod memory;
pub use memory::MemoryBackend;

pub use backend::{AuthClient, Filter, Table, TableClient};
pub use cache::{QueryCache, QueryKey};
pub use config::DashboardConfig;
pub use error::BackendError;
pub use liveness::Liveness;
pub use models::{
    Client, ClientDraft, Entity, Module, ModuleDraft, UserInfo, Version, VersionDraft,
};
pub use permissions::Permissions;
pub use repo::Releases;
pub use role::{Capability, MenuKey, Role};
pub use selection::Selection;
pub use session::{AuthState, Session, SubscriptionId};
pub use stats::DashboardStats;

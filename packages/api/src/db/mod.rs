//! # Database: connection pool and table access
//!
//! Everything here is gated behind `#[cfg(feature = "server")]` so client
//! (WASM) builds never pull in SQLx.
//!
//! - [`get_pool`] returns the process-wide `&'static PgPool`, opened on first
//!   use from [`crate::settings::Settings`].
//! - [`tables`] runs the row queries behind the `rows` server functions.

#[cfg(feature = "server")]
mod pool;
#[cfg(feature = "server")]
pub mod tables;

#[cfg(feature = "server")]
pub use pool::get_pool;

//! Password authentication, session keys and server-side permission checks.

#[cfg(feature = "server")]
mod guard;
#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use guard::{current_user, require_admin, require_capability, require_reader};
#[cfg(feature = "server")]
pub use password::{hash_password, verify_password, MIN_PASSWORD_LEN};
#[cfg(feature = "server")]
pub use session::SESSION_USER_ID_KEY;

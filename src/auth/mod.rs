//! Request authorization subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → rate_limit.rs (check per-IP, per-endpoint window)
//!     → route_gate.rs (page navigation only: role-scoped redirects)
//!     → handler
//!         → validator.rs (origin check + session cookie → principal ID)
//!         → business logic
//! Login:
//!     → password.rs (verify salted bcrypt hash)
//!     → session.rs (mint signed token, set cookie)
//! ```
//!
//! # Design Decisions
//! - Fail closed: any check failure rejects the request
//! - The route gate and validator trust the token's embedded role claim;
//!   stored roles are never re-read during verification, so a role change
//!   takes effect only when the session is reissued
//! - Sessions are self-contained (no server-side table); logout deletes
//!   the cookie, and an unexpired replayed token remains valid

pub mod error;
pub mod password;
pub mod rate_limit;
pub mod route_gate;
pub mod session;
pub mod validator;

pub use error::AuthError;
pub use rate_limit::RateLimiter;
pub use session::{Role, SessionClaims, Sessions, SESSION_COOKIE};

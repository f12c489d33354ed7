//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware wiring)
//!     → rate limit middleware (429 before anything else)
//!     → route gate middleware (page navigation only)
//!     → handlers.rs (API endpoints: validate origin+session, audit,
//!       business logic) / pages.rs (placeholder page trees)
//! ```

pub mod handlers;
pub mod pages;
pub mod server;

pub use server::{AppState, HttpServer};

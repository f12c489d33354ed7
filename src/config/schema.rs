//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! storefront server. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the storefront server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Session and credential settings.
    pub auth: AuthConfig,

    /// Per-IP, per-endpoint rate limiting.
    pub rate_limit: RateLimitConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Session and credential settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Secret used to sign session tokens (HS256). Must be non-empty.
    pub session_secret: String,

    /// Session lifetime in seconds (default: 7 days).
    pub session_ttl_secs: u64,

    /// Set the `Secure` attribute on the session cookie (enable in
    /// production behind TLS).
    pub cookie_secure: bool,

    /// bcrypt cost factor for password hashing.
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            session_ttl_secs: 7 * 24 * 60 * 60,
            cookie_secure: false,
            bcrypt_cost: 10,
        }
    }
}

/// Rate limiting configuration.
///
/// Counters are process-local and never evicted; the limiter is correct
/// only for a single-process deployment. That boundary is inherited from
/// the design, not something to paper over here.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Length of the counting window in seconds.
    pub window_secs: u64,

    /// Maximum requests allowed per (client IP, endpoint) key per window.
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            max_requests: 60,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

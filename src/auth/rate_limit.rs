//! Rate limiting middleware: fixed window per (client IP, endpoint).
//!
//! State is a process-local counter map created at startup and shared via
//! `Arc`. Entries are never evicted, and nothing is persisted or
//! coordinated across processes; this limiter is correct only for a
//! single-process deployment. Counts within a window are exact: the map
//! is mutex-guarded so concurrent requests cannot lose increments.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::error::AuthError;
use crate::config::RateLimitConfig;

/// Counter state for one (client IP, endpoint) key.
struct WindowEntry {
    count: u32,
    window_start: Instant,
}

/// Fixed-window request counter keyed by (client IP, endpoint path).
pub struct RateLimiter {
    entries: Mutex<HashMap<(String, String), WindowEntry>>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            window: Duration::from_secs(config.window_secs),
            max_requests: config.max_requests,
        }
    }

    /// Record one request for the key and decide whether it may proceed.
    ///
    /// The first request for a key opens a window with count 1. Once the
    /// window has elapsed the counter resets and a new window opens. At
    /// the cap the request is rejected without incrementing further.
    pub fn allow(&self, client_ip: &str, endpoint: &str) -> bool {
        let now = Instant::now();
        let mut entries = self.entries.lock().expect("rate limiter mutex poisoned");

        let entry = entries
            .entry((client_ip.to_string(), endpoint.to_string()))
            .or_insert_with(|| WindowEntry {
                count: 0,
                window_start: now,
            });

        if now.duration_since(entry.window_start) > self.window {
            entry.count = 1;
            entry.window_start = now;
            return true;
        }

        if entry.count >= self.max_requests {
            return false;
        }

        entry.count += 1;
        true
    }

    /// Number of distinct keys seen so far (grows for the process
    /// lifetime).
    pub fn tracked_keys(&self) -> usize {
        self.entries.lock().expect("rate limiter mutex poisoned").len()
    }
}

/// Client IP for rate limiting: first `X-Forwarded-For` hop when present,
/// socket peer address otherwise.
pub fn client_ip(request: &Request<Body>, peer: &SocketAddr) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| peer.ip().to_string())
}

/// Middleware enforcing the per-IP, per-endpoint cap before any further
/// processing. Rejected requests get 429 and never reach the handler.
pub async fn rate_limit_middleware(
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&request, &peer);
    let endpoint = request.uri().path().to_string();

    if limiter.allow(&ip, &endpoint) {
        next.run(request).await
    } else {
        tracing::warn!(client = %ip, endpoint = %endpoint, "Rate limit exceeded");
        AuthError::RateLimited.into_response()
    }
}

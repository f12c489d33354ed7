//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, rate limit, route gate)
//! - Bind the server to a listener
//!
//! Middleware ordering per request: trace → timeout → rate limit →
//! route gate → handler. The rate limiter sees every request; the route
//! gate only acts on role-scoped page trees.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::audit::{AuditLog, MemoryAuditStore};
use crate::auth::rate_limit::{rate_limit_middleware, RateLimiter};
use crate::auth::route_gate::route_gate_middleware;
use crate::auth::session::Sessions;
use crate::config::AppConfig;
use crate::http::{handlers, pages};
use crate::store::{CatalogStore, PrincipalStore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Sessions>,
    pub limiter: Arc<RateLimiter>,
    pub principals: Arc<PrincipalStore>,
    pub catalog: Arc<CatalogStore>,
    pub audit: Arc<AuditLog<MemoryAuditStore>>,
    pub bcrypt_cost: u32,
}

/// HTTP server for the storefront API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let sessions = Arc::new(Sessions::new(
            &config.auth.session_secret,
            config.auth.session_ttl_secs,
            config.auth.cookie_secure,
        ));
        let limiter = Arc::new(RateLimiter::new(&config.rate_limit));

        let state = AppState {
            sessions: sessions.clone(),
            limiter: limiter.clone(),
            principals: Arc::new(PrincipalStore::new()),
            catalog: Arc::new(CatalogStore::new()),
            audit: Arc::new(AuditLog::new(MemoryAuditStore::new())),
            bcrypt_cost: config.auth.bcrypt_cost,
        };

        let router = Self::build_router(&config, state.clone(), sessions, limiter);
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(
        config: &AppConfig,
        state: AppState,
        sessions: Arc<Sessions>,
        limiter: Arc<RateLimiter>,
    ) -> Router {
        let api = Router::new()
            .route("/api/signup", post(handlers::signup))
            .route("/api/login", post(handlers::login))
            .route("/api/logout", post(handlers::logout))
            .route("/api/products", get(handlers::list_products))
            .route("/api/add-product", post(handlers::add_product))
            .route("/api/buy-product", post(handlers::buy_product))
            .route("/api/update-profile", post(handlers::update_profile));

        let page_routes = Router::new()
            .route("/", get(pages::landing))
            .route("/account/login", get(pages::login_page))
            .route("/admin", get(pages::admin_home))
            .route("/seller", get(pages::seller_home))
            .route("/categories", get(pages::categories_home));

        Router::new()
            .merge(api)
            .merge(page_routes)
            .with_state(state)
            .layer(middleware::from_fn_with_state(sessions, route_gate_middleware))
            .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Shared application state (used by the binary to seed demo data).
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server until shutdown.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown handler");
    }
    tracing::info!("Shutdown signal received");
}

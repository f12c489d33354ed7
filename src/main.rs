//! Storefront API server.
//!
//! Request authorization pipeline in front of the storefront's CRUD
//! endpoints:
//!
//! ```text
//! Client request
//!     → rate limiter        (per-IP, per-endpoint fixed window)
//!     → route gate          (role-scoped page trees, page navigation)
//!     → handler
//!         → origin + session validator (Referer check, cookie → principal)
//!         → audit log
//!         → business logic
//! ```
//!
//! Sessions are signed self-contained tokens (no server-side table);
//! passwords are stored as salted bcrypt hashes; the rate limiter and
//! stores are process-local.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront::config::loader::load_config;
use storefront::{AppConfig, HttpServer};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "E-commerce storefront API server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("storefront v0.1.0 starting");

    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => load_config(&path)?,
        None => {
            let mut config = AppConfig::default();
            // No config file: run with an ephemeral signing secret.
            // Sessions will not survive a restart.
            config.auth.session_secret = uuid::Uuid::new_v4().to_string();
            tracing::warn!("No config file given; using an ephemeral session secret");
            config
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        rate_limit_window_secs = config.rate_limit.window_secs,
        rate_limit_max_requests = config.rate_limit.max_requests,
        session_ttl_secs = config.auth.session_ttl_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config);

    // Demo catalog so a fresh process has something to browse.
    server.state().catalog.add("Mechanical keyboard", 8999, 25);
    server.state().catalog.add("USB-C dock", 14999, 10);

    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

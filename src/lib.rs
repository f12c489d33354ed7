//! Storefront API server library.

pub mod audit;
pub mod auth;
pub mod config;
pub mod http;
pub mod store;

pub use config::AppConfig;
pub use http::HttpServer;

//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use storefront::auth::session::Role;
use storefront::http::AppState;
use storefront::{AppConfig, HttpServer};

/// Config for tests: fast hashing, roomy default rate limit.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.session_secret = "integration-test-secret".into();
    config.auth.bcrypt_cost = 4;
    config.rate_limit.window_secs = 60;
    config.rate_limit.max_requests = 1000;
    config
}

/// Start the server on an ephemeral port; returns its address and a
/// handle on the shared state (audit trail, stores).
pub async fn start_server(config: AppConfig) -> (SocketAddr, AppState) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config);
    let state = server.state().clone();

    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });

    (addr, state)
}

/// HTTP client with redirects disabled so gate redirects are observable.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// A same-origin Referer for the given server address.
#[allow(dead_code)]
pub fn referer(addr: &SocketAddr) -> String {
    format!("http://{}/categories", addr)
}

/// Sign up a user and log in; returns (user_id, session token).
#[allow(dead_code)]
pub async fn signup_and_login(
    addr: &SocketAddr,
    username: &str,
    password: &str,
    role: Role,
) -> (String, String) {
    let client = client();
    let base = format!("http://{}", addr);

    let res = client
        .post(format!("{}/api/signup", base))
        .json(&serde_json::json!({
            "username": username,
            "password": password,
            "display_name": username,
            "role": role,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201, "signup failed");

    let res = client
        .post(format!("{}/api/login", base))
        .json(&serde_json::json!({ "username": username, "password": password }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200, "login failed");

    let body: serde_json::Value = res.json().await.unwrap();
    (
        body["user_id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

//! End-to-end rate limiting behavior.

mod common;

/// 61 calls to one endpoint from one IP inside the window. The first 60
/// proceed to origin/session validation (403 here,
/// since none carry a Referer); the 61st is cut off with 429 before any
/// further processing.
#[tokio::test]
async fn test_sixty_first_request_is_rate_limited() {
    let mut config = common::test_config();
    config.rate_limit.window_secs = 60;
    config.rate_limit.max_requests = 60;
    let (addr, state) = common::start_server(config).await;
    let client = common::client();
    let url = format!("http://{}/api/buy-product", addr);

    for i in 1..=60 {
        let res = client
            .post(&url)
            .header("X-Forwarded-For", "1.2.3.4")
            .json(&serde_json::json!({ "product_id": "p1" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 403, "request {} should reach the validator", i);
    }

    let res = client
        .post(&url)
        .header("X-Forwarded-For", "1.2.3.4")
        .json(&serde_json::json!({ "product_id": "p1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 429);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("too many requests"));

    // Nothing past the limiter ran, so nothing was audited.
    assert!(state.audit.store().entries().is_empty());
}

#[tokio::test]
async fn test_limit_is_per_ip_and_per_endpoint() {
    let mut config = common::test_config();
    config.rate_limit.max_requests = 2;
    let (addr, _state) = common::start_server(config).await;
    let client = common::client();
    let base = format!("http://{}", addr);

    for _ in 0..2 {
        let res = client
            .get(format!("{}/api/products", base))
            .header("X-Forwarded-For", "9.9.9.9")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 403);
    }
    let res = client
        .get(format!("{}/api/products", base))
        .header("X-Forwarded-For", "9.9.9.9")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 429);

    // A different client IP still has its full quota.
    let res = client
        .get(format!("{}/api/products", base))
        .header("X-Forwarded-For", "8.8.8.8")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 403);

    // Same IP, different endpoint: separate counter.
    let res = client
        .post(format!("{}/api/buy-product", base))
        .header("X-Forwarded-For", "9.9.9.9")
        .json(&serde_json::json!({ "product_id": "p1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 403);
}

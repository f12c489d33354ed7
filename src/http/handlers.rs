//! API endpoint handlers.
//!
//! Every data-fetching or state-mutating endpoint runs the origin +
//! session validator before touching a store, then records an audit
//! event. The rate limiter has already run as middleware by the time a
//! handler executes.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::error::AuthError;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::Role;
use crate::auth::validator::validate_request;
use crate::http::server::AppState;
use crate::store::StoreError;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub role: Role,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct AddProductRequest {
    pub name: String,
    pub price_cents: u64,
    pub stock: u32,
}

#[derive(Deserialize)]
pub struct BuyProductRequest {
    pub product_id: String,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
}

/// Create a principal and its credential.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Response, AuthError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Username and password are required" })),
        )
            .into_response());
    }

    // The principal ID doubles as salt material, so it is minted before
    // the hash.
    let id = Uuid::new_v4().to_string();
    let hash = {
        let password = req.password.clone();
        let id = id.clone();
        let cost = state.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash_password(&password, &id, cost))
            .await
            .map_err(|e| AuthError::Infrastructure(format!("hash task failed: {}", e)))??
    };

    match state
        .principals
        .create(id, &req.username, &req.display_name, req.role, hash)
    {
        Ok(p) => {
            state.audit.record(&p.id, "register-user");
            Ok((
                StatusCode::CREATED,
                Json(json!({ "user_id": p.id, "role": p.role })),
            )
                .into_response())
        }
        Err(StoreError::DuplicateUsername) => Ok((
            StatusCode::CONFLICT,
            Json(json!({ "error": "Username already taken" })),
        )
            .into_response()),
        Err(e) => Err(AuthError::Infrastructure(e.to_string())),
    }
}

/// Verify a username/password pair and mint a session.
///
/// Unknown usernames and wrong passwords produce the identical 401
/// response so the endpoint cannot be used to enumerate accounts. No
/// audit entry is written for failed attempts (there is no verified
/// principal to attribute them to).
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AuthError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Username and password are required" })),
        )
            .into_response());
    }

    let (principal, stored_hash) = state
        .principals
        .find_by_username(&req.username)
        .ok_or(AuthError::InvalidCredential)?;

    let valid = {
        let password = req.password.clone();
        let principal_id = principal.id.clone();
        tokio::task::spawn_blocking(move || {
            verify_password(&password, &stored_hash, &principal_id)
        })
        .await
        .map_err(|e| AuthError::Infrastructure(format!("verify task failed: {}", e)))?
    };
    if !valid {
        return Err(AuthError::InvalidCredential);
    }

    let token = state.sessions.issue(&principal.id, principal.role)?;
    let cookie = state.sessions.login_cookie(&token);

    state.audit.record(&principal.id, "verify-user");

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({
            "message": "Login successful",
            "user_id": principal.id,
            "role": principal.role,
            "token": token,
        })),
    )
        .into_response())
}

/// Delete the session cookie. Requires a valid session; the token itself
/// stays cryptographically valid until expiry (no revocation list).
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AuthError> {
    let principal_id = validate_request(&headers, &state.sessions)?;
    state.audit.record(&principal_id, "logout");

    Ok((
        [(header::SET_COOKIE, state.sessions.logout_cookie())],
        Json(json!({ "message": "Logged out" })),
    )
        .into_response())
}

/// List the catalog.
pub async fn list_products(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AuthError> {
    let principal_id = validate_request(&headers, &state.sessions)?;
    let products = state.catalog.list();
    state.audit.record(&principal_id, "list-products");
    Ok(Json(products).into_response())
}

/// Add a catalog item.
pub async fn add_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AddProductRequest>,
) -> Result<Response, AuthError> {
    let principal_id = validate_request(&headers, &state.sessions)?;
    let product = state.catalog.add(&req.name, req.price_cents, req.stock);
    state.audit.record(&principal_id, "add-product");
    Ok((StatusCode::CREATED, Json(product)).into_response())
}

/// Purchase one unit of a product.
pub async fn buy_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<BuyProductRequest>,
) -> Result<Response, AuthError> {
    let principal_id = validate_request(&headers, &state.sessions)?;

    match state.catalog.buy(&req.product_id) {
        Ok(product) => {
            state.audit.record(&principal_id, "buy-product");
            Ok(Json(json!({ "message": "Purchase complete", "product": product })).into_response())
        }
        Err(StoreError::NotFound) => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Product not found" })),
        )
            .into_response()),
        Err(StoreError::OutOfStock) => Ok((
            StatusCode::CONFLICT,
            Json(json!({ "error": "Product out of stock" })),
        )
            .into_response()),
        Err(e) => Err(AuthError::Infrastructure(e.to_string())),
    }
}

/// Update the caller's display name.
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Response, AuthError> {
    let principal_id = validate_request(&headers, &state.sessions)?;

    state
        .principals
        .update_display_name(&principal_id, &req.display_name)
        .map_err(|e| AuthError::Infrastructure(e.to_string()))?;

    state.audit.record(&principal_id, "update-profile");
    Ok(Json(json!({ "message": "Profile updated" })).into_response())
}

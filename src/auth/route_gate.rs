//! Role-based route gating for page navigation.
//!
//! Runs before any page handler. Three page trees are role-scoped:
//! `/admin` (admin), `/seller` (seller), and `/categories` (customer
//! browsing); every other path bypasses the gate. A request with no
//! session cookie is sent to the login page. A request whose cookie fails
//! verification, or whose role does not match the tree, is sent to the
//! neutral landing route; that is the same redirect a nonexistent scoped
//! page produces, so "forbidden" and "does not exist" are
//! indistinguishable from outside.
//!
//! The gate never queries the store; the token's embedded role claim is
//! the only input to the decision.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::session::{token_from_headers, Role, Sessions};

/// Login page for requests with no session at all.
pub const LOGIN_ROUTE: &str = "/account/login";

/// Neutral landing route for every other gate rejection.
pub const LANDING_ROUTE: &str = "/";

/// Role required for a path, or `None` if the path is unscoped.
pub fn required_role(path: &str) -> Option<Role> {
    for (prefix, role) in [
        ("/admin", Role::Admin),
        ("/seller", Role::Seller),
        ("/categories", Role::Customer),
    ] {
        // Segment-aware: "/admin" and "/admin/users" are scoped,
        // "/administrator" is not.
        if path == prefix || path.starts_with(&format!("{}/", prefix)) {
            return Some(role);
        }
    }
    None
}

/// Middleware enforcing the role scoping above.
pub async fn route_gate_middleware(
    State(sessions): State<Arc<Sessions>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();
    let required = match required_role(path) {
        Some(role) => role,
        None => return next.run(request).await,
    };

    let token = match token_from_headers(request.headers()) {
        Some(token) => token,
        None => return Redirect::to(LOGIN_ROUTE).into_response(),
    };

    match sessions.verify(&token) {
        Ok(claims) if claims.role == required => next.run(request).await,
        Ok(claims) => {
            // Same response as a bad token or a missing page: reveal
            // nothing about why access failed.
            tracing::warn!(path = %path, role = %claims.role, "Role-scoped page denied");
            Redirect::to(LANDING_ROUTE).into_response()
        }
        Err(_) => Redirect::to(LANDING_ROUTE).into_response(),
    }
}

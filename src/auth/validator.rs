//! Per-request origin and session validation.
//!
//! Every data-fetching or state-mutating API handler runs this gate
//! before touching the data model. Two independent checks, both
//! mandatory:
//!
//! 1. Origin: the `Referer` header must be present and contain the
//!    request's own `Host`. This blocks casual cross-origin calls from
//!    scripts and tools, but any client that controls its own headers can
//!    spoof it. It is a deterrent, not a security boundary.
//! 2. Session: the session cookie on the request must verify. Identity
//!    is resolved in-process from the cookie; no auth round-trip.

use axum::http::{header, HeaderMap};

use crate::auth::error::AuthError;
use crate::auth::session::{token_from_headers, Sessions};

/// Validate a request's origin and session, resolving the authenticated
/// principal's ID or the specific rejection.
pub fn validate_request(headers: &HeaderMap, sessions: &Sessions) -> Result<String, AuthError> {
    check_origin(headers)?;

    let token = token_from_headers(headers).ok_or(AuthError::Unauthenticated)?;
    let claims = sessions.verify(&token).map_err(|_| AuthError::Unauthenticated)?;

    Ok(claims.sub)
}

/// Reject requests whose `Referer` is absent or does not mention the
/// serving host.
fn check_origin(headers: &HeaderMap) -> Result<(), AuthError> {
    let referer = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if referer.is_empty() || host.is_empty() || !referer.contains(host) {
        tracing::warn!(referer = %referer, host = %host, "Blocked API call with invalid origin");
        return Err(AuthError::InvalidOrigin);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::Role;

    fn sessions() -> Sessions {
        Sessions::new("test-secret", 3600, false)
    }

    fn headers(referer: Option<&str>, host: Option<&str>, token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(r) = referer {
            headers.insert(header::REFERER, r.parse().unwrap());
        }
        if let Some(h) = host {
            headers.insert(header::HOST, h.parse().unwrap());
        }
        if let Some(t) = token {
            headers.insert(header::COOKIE, format!("token={}", t).parse().unwrap());
        }
        headers
    }

    #[test]
    fn test_valid_request_resolves_principal() {
        let s = sessions();
        let token = s.issue("user-1", Role::Customer).unwrap();
        let headers = headers(
            Some("http://shop.test/categories"),
            Some("shop.test"),
            Some(&token),
        );
        assert_eq!(validate_request(&headers, &s).unwrap(), "user-1");
    }

    #[test]
    fn test_missing_referer_rejected_despite_valid_session() {
        let s = sessions();
        let token = s.issue("user-1", Role::Customer).unwrap();
        let headers = headers(None, Some("shop.test"), Some(&token));
        assert!(matches!(
            validate_request(&headers, &s),
            Err(AuthError::InvalidOrigin)
        ));
    }

    #[test]
    fn test_foreign_referer_rejected() {
        let s = sessions();
        let token = s.issue("user-1", Role::Customer).unwrap();
        let headers = headers(Some("http://evil.test/"), Some("shop.test"), Some(&token));
        assert!(matches!(
            validate_request(&headers, &s),
            Err(AuthError::InvalidOrigin)
        ));
    }

    #[test]
    fn test_missing_cookie_is_unauthenticated() {
        let s = sessions();
        let headers = headers(Some("http://shop.test/"), Some("shop.test"), None);
        assert!(matches!(
            validate_request(&headers, &s),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_bad_token_is_unauthenticated() {
        let s = sessions();
        let headers = headers(Some("http://shop.test/"), Some("shop.test"), Some("garbage"));
        assert!(matches!(
            validate_request(&headers, &s),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_origin_checked_before_session() {
        // Both checks would fail here; the origin rejection wins, so a
        // prober without a session cannot learn whether one was needed.
        let s = sessions();
        let headers = headers(None, Some("shop.test"), None);
        assert!(matches!(
            validate_request(&headers, &s),
            Err(AuthError::InvalidOrigin)
        ));
    }
}

//! Session token issuance and verification.
//!
//! Sessions are self-contained signed tokens (HS256) carrying the
//! principal ID and role claim. There is no server-side session table:
//! verification is purely cryptographic, and logout is "delete the
//! cookie". A still-unexpired token replayed after logout verifies until
//! its expiry; that is an accepted limitation of this design, not a bug.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::http::{header, HeaderMap};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::error::AuthError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Closed set of principal roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Principal ID.
    pub sub: String,
    /// Role claim, trusted as-is for authorization decisions. A role
    /// change in the store takes effect only when the session is
    /// reissued.
    pub role: Role,
    /// Issue time (seconds since epoch).
    pub iat: u64,
    /// Expiry (seconds since epoch).
    pub exp: u64,
}

/// Opaque verification failure: bad signature, malformed token, or
/// expired. Callers treat all three as "unauthenticated".
#[derive(Debug, Error)]
#[error("invalid session token")]
pub struct SessionInvalid;

/// Issues and verifies session tokens against the server-held secret.
pub struct Sessions {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    cookie_secure: bool,
}

impl Sessions {
    pub fn new(secret: &str, ttl_secs: u64, cookie_secure: bool) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::from_secs(ttl_secs),
            cookie_secure,
        }
    }

    /// Mint a signed token for the given principal, valid for the
    /// configured lifetime (7 days by default).
    pub fn issue(&self, principal_id: &str, role: Role) -> Result<String, AuthError> {
        let now = now_unix_secs();
        let claims = SessionClaims {
            sub: principal_id.to_string(),
            role,
            iat: now,
            exp: now + self.ttl.as_secs(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Infrastructure(format!("token signing failed: {}", e)))
    }

    /// Verify a token's signature and expiry and return its claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionInvalid> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<SessionClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| SessionInvalid)
    }

    /// `Set-Cookie` value installing the session token: HTTP-only, whole
    /// site, max-age equal to the token lifetime, `Secure` in production.
    pub fn login_cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
            SESSION_COOKIE,
            token,
            self.ttl.as_secs()
        );
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value deleting the session cookie.
    pub fn logout_cookie(&self) -> String {
        let mut cookie = format!("{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax", SESSION_COOKIE);
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Extract the session token from a request's `Cookie` header, if any.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in cookies.split(';') {
        let pair = pair.trim();
        if let Some(value) = pair.strip_prefix(SESSION_COOKIE) {
            if let Some(value) = value.strip_prefix('=') {
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Current time as seconds since the Unix epoch.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sessions() -> Sessions {
        Sessions::new("test-secret", 7 * 24 * 60 * 60, false)
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let s = sessions();
        let token = s.issue("user-1", Role::Seller).unwrap();
        let claims = s.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, Role::Seller);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let s = sessions();
        let now = now_unix_secs();
        let claims = SessionClaims {
            sub: "user-1".into(),
            role: Role::Customer,
            iat: now - 120,
            exp: now - 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(s.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let s = sessions();
        assert!(s.verify("").is_err());
        assert!(s.verify("not.a.jwt").is_err());
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = Sessions::new("other-secret", 60, false)
            .issue("user-1", Role::Admin)
            .unwrap();
        assert!(sessions().verify(&token).is_err());
    }

    #[test]
    fn test_cookie_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "theme=dark; token=abc123; lang=en".parse().unwrap());
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_cookie_extraction_missing_or_empty() {
        assert_eq!(token_from_headers(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "token=".parse().unwrap());
        assert_eq!(token_from_headers(&headers), None);
    }

    #[test]
    fn test_login_cookie_attributes() {
        let cookie = sessions().login_cookie("abc");
        assert!(cookie.starts_with("token=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(!cookie.contains("Secure"));

        let secure = Sessions::new("s", 60, true).login_cookie("abc");
        assert!(secure.contains("Secure"));
    }

    #[test]
    fn test_logout_cookie_expires_immediately() {
        assert!(sessions().logout_cookie().contains("Max-Age=0"));
    }
}

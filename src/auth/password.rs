//! Password hashing and verification.
//!
//! The salt material is the principal's own ID appended to the plaintext
//! before bcrypt runs. That scheme is inherited from the product's data
//! model (hashes are only comparable with the owning principal's ID in
//! hand) and is kept as-is; it is not a recommendation for new designs.

use crate::auth::error::AuthError;

/// Hash a password for storage, salting with the owning principal's ID.
///
/// bcrypt is intentionally CPU-heavy; callers on the request path should
/// wrap this in `tokio::task::spawn_blocking`.
pub fn hash_password(password: &str, principal_id: &str, cost: u32) -> Result<String, AuthError> {
    let salted = format!("{}{}", password, principal_id);
    bcrypt::hash(&salted, cost)
        .map_err(|e| AuthError::Infrastructure(format!("password hashing failed: {}", e)))
}

/// Verify an entered password against the stored hash.
///
/// Any mismatch returns `false`, including a malformed stored hash; the
/// caller cannot distinguish "wrong password" from "corrupt record", which
/// is the intended behavior for a login check.
pub fn verify_password(entered: &str, stored_hash: &str, principal_id: &str) -> bool {
    let salted = format!("{}{}", entered, principal_id);
    bcrypt::verify(&salted, stored_hash).unwrap_or(false)
}

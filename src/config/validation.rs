//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (windows > 0, bcrypt cost sane)
//! - Reject empty signing secrets before the server accepts traffic
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::AppConfig;

/// A single semantic validation failure.
#[derive(Debug)]
pub struct ValidationError {
    /// Config field the error refers to (e.g., "auth.session_secret").
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.auth.session_secret.is_empty() {
        errors.push(ValidationError {
            field: "auth.session_secret".into(),
            message: "session signing secret must not be empty".into(),
        });
    }

    if config.auth.session_ttl_secs == 0 {
        errors.push(ValidationError {
            field: "auth.session_ttl_secs".into(),
            message: "session lifetime must be greater than zero".into(),
        });
    }

    // bcrypt itself rejects costs outside 4..=31; catching it here gives a
    // config-level error instead of a failed first signup.
    if !(4..=31).contains(&config.auth.bcrypt_cost) {
        errors.push(ValidationError {
            field: "auth.bcrypt_cost".into(),
            message: "bcrypt cost must be within 4..=31".into(),
        });
    }

    if config.rate_limit.window_secs == 0 {
        errors.push(ValidationError {
            field: "rate_limit.window_secs".into(),
            message: "rate limit window must be greater than zero".into(),
        });
    }

    if config.rate_limit.max_requests == 0 {
        errors.push(ValidationError {
            field: "rate_limit.max_requests".into(),
            message: "rate limit cap must be greater than zero".into(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs".into(),
            message: "request timeout must be greater than zero".into(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.session_secret = "secret".into();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = AppConfig::default();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "auth.session_secret"));
    }

    #[test]
    fn test_all_errors_collected() {
        let mut config = AppConfig::default();
        config.rate_limit.window_secs = 0;
        config.rate_limit.max_requests = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3); // secret + both rate limit fields
    }

    #[test]
    fn test_bcrypt_cost_range() {
        let mut config = valid_config();
        config.auth.bcrypt_cost = 3;
        assert!(validate_config(&config).is_err());
        config.auth.bcrypt_cost = 31;
        assert!(validate_config(&config).is_ok());
    }
}

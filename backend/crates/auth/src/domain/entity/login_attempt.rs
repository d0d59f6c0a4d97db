//! Login Attempt Entity
//!
//! Immutable, append-only audit record of one authentication attempt.
//! Written for every verification attempt (success or failure, account
//! found or not) and only ever read in aggregate (count inside a
//! trailing window). Never mutated or deleted by the auth core.

use chrono::{DateTime, Utc};

/// One authentication attempt
#[derive(Debug, Clone)]
pub struct LoginAttempt {
    /// Identifier that was attempted (as submitted, lowercased)
    pub email: String,
    /// Origin address of the request
    pub ip_address: String,
    /// Whether the attempt authenticated successfully
    pub success: bool,
    /// When the attempt happened
    pub attempted_at: DateTime<Utc>,
}

impl LoginAttempt {
    /// Record an attempt happening now
    pub fn now(email: impl Into<String>, ip_address: impl Into<String>, success: bool) -> Self {
        Self {
            email: email.into(),
            ip_address: ip_address.into(),
            success,
            attempted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_timestamps_now() {
        let before = Utc::now();
        let attempt = LoginAttempt::now("user@x.com", "127.0.0.1", false);
        assert!(attempt.attempted_at >= before);
        assert!(!attempt.success);
        assert_eq!(attempt.email, "user@x.com");
    }
}

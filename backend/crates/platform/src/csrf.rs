//! Anti-Forgery (CSRF) Tokens
//!
//! Per-session tokens proving that a mutating request originated from the
//! legitimate client session. Tokens carry 256 bits of OS entropy and are
//! compared in constant time; freshness (issue time vs expiry window) is
//! tracked by the session that owns the token.

use crate::crypto::{constant_time_eq, random_bytes, to_base64url};

/// Token entropy in bytes (32 bytes = 256 bits)
pub const CSRF_TOKEN_BYTES: usize = 32;

/// Generate a new anti-forgery token
///
/// ## Returns
/// A base64 URL-safe encoded string without padding (43 characters)
pub fn generate_token() -> String {
    to_base64url(&random_bytes(CSRF_TOKEN_BYTES))
}

/// Verify a supplied token against the session's active token
///
/// Constant-time comparison over the encoded form; a missing active token
/// is the caller's responsibility to reject before reaching this point.
pub fn verify_token(active: &str, supplied: &str) -> bool {
    constant_time_eq(active.as_bytes(), supplied.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation() {
        let token1 = generate_token();
        let token2 = generate_token();

        assert_ne!(token1, token2);

        // 32 bytes of entropy encoded in unpadded base64url: 43 chars
        assert_eq!(token1.len(), 43);
    }

    #[test]
    fn test_verify_matching_token() {
        let token = generate_token();
        assert!(verify_token(&token, &token.clone()));
    }

    #[test]
    fn test_verify_rejects_mismatch() {
        let a = generate_token();
        let b = generate_token();
        assert!(!verify_token(&a, &b));
    }

    #[test]
    fn test_verify_rejects_prefix() {
        let token = generate_token();
        assert!(!verify_token(&token, &token[..token.len() - 1]));
        assert!(!verify_token(&token, ""));
    }
}

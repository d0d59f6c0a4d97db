//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::rate_limit::RateLimitConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Identity rotation interval (1 hour); sessions renew, never expire
    pub session_rotation_interval: Duration,
    /// Anti-forgery token validity window (1 hour)
    pub csrf_token_ttl: Duration,
    /// Pre-lookup login rate limit (10 attempts / 15 minutes)
    ///
    /// Deliberately above the per-account lockout threshold (5) so a
    /// single account's failures hit the lockout state machine, with its
    /// precise feedback, before the blunt window check fires. The window
    /// is what stops enumeration and identifier spray.
    pub login_rate_limit: RateLimitConfig,
    /// Idle sessions older than this are reaped at startup (30 days)
    pub session_idle_purge: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "mk_session".to_string(),
            session_secret: [0u8; 32],
            session_rotation_interval: Duration::from_secs(3600),
            csrf_token_ttl: Duration::from_secs(3600),
            login_rate_limit: RateLimitConfig::new(10, 900),
            session_idle_purge: Duration::from_secs(30 * 24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut secret);
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Rotation interval as chrono duration
    pub fn rotation_interval(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_rotation_interval.as_secs() as i64)
    }

    /// CSRF TTL as chrono duration
    pub fn csrf_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.csrf_token_ttl.as_secs() as i64)
    }

    /// Rate-limit window as chrono duration
    pub fn rate_limit_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.login_rate_limit.window_secs())
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_windows() {
        let config = AuthConfig::default();
        assert_eq!(config.session_rotation_interval.as_secs(), 3600);
        assert_eq!(config.csrf_token_ttl.as_secs(), 3600);
        assert_eq!(config.login_rate_limit.max_attempts, 10);
        assert_eq!(config.login_rate_limit.window_secs(), 900);
    }

    #[test]
    fn test_random_secret_differs() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_ne!(a.session_secret, b.session_secret);
    }

    #[test]
    fn test_development_insecure_cookie() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
    }
}

//! Rate Limiting Infrastructure
//!
//! Window/threshold vocabulary for brute-force protection. The store
//! counts attempts inside the trailing window; this module decides.

use std::time::Duration;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum attempts allowed in the window
    pub max_attempts: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_secs(900),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_attempts: u32, window_secs: u64) -> Self {
        Self {
            max_attempts,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_secs(&self) -> i64 {
        self.window.as_secs() as i64
    }

    /// Evaluate an observed attempt count against the limit
    pub fn evaluate(&self, observed: u32) -> RateLimitDecision {
        RateLimitDecision {
            allowed: observed < self.max_attempts,
            remaining: self.max_attempts.saturating_sub(observed),
        }
    }
}

/// Rate limit check result
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.window_secs(), 900);
    }

    #[test]
    fn test_evaluate_below_limit() {
        let config = RateLimitConfig::new(5, 900);
        let decision = config.evaluate(4);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 1);
    }

    #[test]
    fn test_evaluate_at_limit() {
        let config = RateLimitConfig::new(5, 900);
        let decision = config.evaluate(5);
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);

        // Saturates rather than underflows past the limit
        assert_eq!(config.evaluate(12).remaining, 0);
    }
}

//! Credential Entity
//!
//! Authentication secret and brute-force protection state for one
//! account. Separated from the Account entity so profile reads never
//! touch the sensitive row.
//!
//! The lockout state machine lives here:
//! - `Open`: failures below the threshold; each failure increments the
//!   counter.
//! - `Locked`: the threshold was reached; the counter resets to zero and
//!   the account rejects logins until `locked_until` passes, after which
//!   any authentication check clears the lock.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{account_id::AccountId, user_password::UserPassword};

/// Credential entity
#[derive(Debug, Clone)]
pub struct Credential {
    /// Reference to Account
    pub account_id: AccountId,
    /// Hashed password (Argon2id PHC string)
    pub password_hash: UserPassword,
    /// Consecutive failed-attempt counter
    pub login_attempts: u16,
    /// Explicit lock flag
    pub account_locked: bool,
    /// Lock expiry; meaningful only while `account_locked`
    pub locked_until: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Failed attempts that trigger a lockout
    pub const MAX_LOGIN_ATTEMPTS: u16 = 5;
    /// Lockout duration in seconds (30 minutes)
    pub const LOCKOUT_SECS: i64 = 1800;

    /// Create new credentials for a freshly registered account
    pub fn new(account_id: AccountId, password_hash: UserPassword) -> Self {
        let now = Utc::now();
        Self {
            account_id,
            password_hash,
            login_attempts: 0,
            account_locked: false,
            locked_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the account is currently locked
    pub fn is_locked(&self) -> bool {
        if !self.account_locked {
            return false;
        }
        match self.locked_until {
            Some(until) => Utc::now() < until,
            // Locked with no expiry should not happen; treat as unlocked
            None => false,
        }
    }

    /// Clear an expired lock (and the counter) before proceeding
    ///
    /// Returns true if a lock was cleared.
    pub fn clear_expired_lock(&mut self) -> bool {
        if self.account_locked && !self.is_locked() {
            self.account_locked = false;
            self.locked_until = None;
            self.login_attempts = 0;
            self.updated_at = Utc::now();
            return true;
        }
        false
    }

    /// Record a failed login attempt
    ///
    /// At `MAX_LOGIN_ATTEMPTS` the account transitions to `Locked`:
    /// the counter resets to zero and `locked_until` is set. Returns true
    /// when this failure triggered the lock.
    pub fn record_failure(&mut self) -> bool {
        let now = Utc::now();
        self.login_attempts += 1;
        self.updated_at = now;

        if self.login_attempts >= Self::MAX_LOGIN_ATTEMPTS {
            self.account_locked = true;
            self.locked_until = Some(now + Duration::seconds(Self::LOCKOUT_SECS));
            self.login_attempts = 0;
            return true;
        }
        false
    }

    /// Reset the failure counter on successful authentication
    pub fn reset_failures(&mut self) {
        self.login_attempts = 0;
        self.account_locked = false;
        self.locked_until = None;
        self.updated_at = Utc::now();
    }

    /// Attempts left before the next failure locks the account
    pub fn remaining_attempts(&self) -> u16 {
        Self::MAX_LOGIN_ATTEMPTS.saturating_sub(self.login_attempts)
    }

    /// Replace the password hash
    pub fn update_password(&mut self, new_password: UserPassword) {
        self.password_hash = new_password;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn credential() -> Credential {
        let raw = RawPassword::new("longenough1".to_string()).unwrap();
        let hash = UserPassword::from_raw(&raw, None).unwrap();
        Credential::new(AccountId::from_i64(1), hash)
    }

    #[test]
    fn test_new_credential_is_open() {
        let cred = credential();
        assert!(!cred.is_locked());
        assert_eq!(cred.login_attempts, 0);
        assert_eq!(cred.remaining_attempts(), 5);
    }

    #[test]
    fn test_failures_below_threshold_stay_open() {
        let mut cred = credential();
        for expected_remaining in [4u16, 3, 2, 1] {
            assert!(!cred.record_failure());
            assert!(!cred.is_locked());
            assert_eq!(cred.remaining_attempts(), expected_remaining);
        }
    }

    #[test]
    fn test_fifth_failure_locks_and_resets_counter() {
        let mut cred = credential();
        for _ in 0..4 {
            assert!(!cred.record_failure());
        }
        assert!(cred.record_failure());
        assert!(cred.is_locked());
        assert_eq!(cred.login_attempts, 0);
        assert!(cred.locked_until.unwrap() > Utc::now());
    }

    #[test]
    fn test_expired_lock_clears_on_check() {
        let mut cred = credential();
        cred.account_locked = true;
        cred.locked_until = Some(Utc::now() - Duration::seconds(1));
        cred.login_attempts = 3;

        // Past its expiry, the lock no longer rejects
        assert!(!cred.is_locked());
        assert!(cred.clear_expired_lock());
        assert!(!cred.account_locked);
        assert_eq!(cred.login_attempts, 0);
        assert!(cred.locked_until.is_none());
    }

    #[test]
    fn test_active_lock_does_not_clear() {
        let mut cred = credential();
        cred.account_locked = true;
        cred.locked_until = Some(Utc::now() + Duration::seconds(60));

        assert!(cred.is_locked());
        assert!(!cred.clear_expired_lock());
        assert!(cred.account_locked);
    }

    #[test]
    fn test_success_resets_counter() {
        let mut cred = credential();
        cred.record_failure();
        cred.record_failure();
        cred.reset_failures();
        assert_eq!(cred.login_attempts, 0);
        assert_eq!(cred.remaining_attempts(), 5);
        assert!(!cred.is_locked());
    }
}

//! Session Entity
//!
//! Server-side session row referenced by an HMAC-signed cookie token.
//! A session starts as a guest session (no account) so it can carry the
//! anti-forgery token through registration and login; binding an account
//! rotates the identity, as does exceeding the rotation interval
//! (sliding renewal: the session is renewed in place, never dropped
//! mid-request).

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::value_object::{account_id::AccountId, user_role::UserRole};

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Session identity (UUID v4, rotated on privilege change and age)
    pub session_id: Uuid,
    /// Bound account; `None` for a guest session
    pub account_id: Option<AccountId>,
    /// Role captured at login
    pub role: Option<UserRole>,
    /// Active anti-forgery token
    pub csrf_token: Option<String>,
    /// When the active token was minted
    pub csrf_issued_at: Option<DateTime<Utc>>,
    /// When the current identity was issued (rotation resets this)
    pub issued_at: DateTime<Utc>,
    /// Last request seen on this session
    pub last_activity_at: DateTime<Utc>,
    /// Origin address at creation (for the audit trail)
    pub client_ip: Option<String>,
    /// Created timestamp (survives rotation)
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a guest session (no account bound yet)
    pub fn guest(client_ip: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4(),
            account_id: None,
            role: None,
            csrf_token: None,
            csrf_issued_at: None,
            issued_at: now,
            last_activity_at: now,
            client_ip,
            created_at: now,
        }
    }

    /// Whether this session is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.account_id.is_some()
    }

    /// Whether the identity has outlived the rotation interval
    pub fn needs_rotation(&self, interval: Duration) -> bool {
        Utc::now() - self.issued_at > interval
    }

    /// Rotate the session identity
    ///
    /// Mints a new uuid and resets the rotation timer. Account binding
    /// and the CSRF token survive; only the identity changes. Returns
    /// the discarded identity so the store can replace the row.
    pub fn rotate(&mut self) -> Uuid {
        let old = self.session_id;
        self.session_id = Uuid::new_v4();
        self.issued_at = Utc::now();
        self.last_activity_at = self.issued_at;
        old
    }

    /// Bind an account at login
    ///
    /// Rotates first so the pre-login identity can never be replayed
    /// into an authenticated session. Returns the discarded identity.
    pub fn attach_account(&mut self, account_id: AccountId, role: UserRole) -> Uuid {
        let old = self.rotate();
        self.account_id = Some(account_id);
        self.role = Some(role);
        old
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    // ========================================================================
    // CSRF token ownership
    // ========================================================================

    /// Whether the active token exists and is younger than `ttl`
    pub fn csrf_is_fresh(&self, ttl: Duration) -> bool {
        match (&self.csrf_token, self.csrf_issued_at) {
            (Some(_), Some(issued)) => Utc::now() - issued <= ttl,
            _ => false,
        }
    }

    /// Return the active token, minting a fresh one when absent or stale
    pub fn issue_csrf(&mut self, ttl: Duration) -> String {
        if !self.csrf_is_fresh(ttl) {
            self.csrf_token = Some(platform::csrf::generate_token());
            self.csrf_issued_at = Some(Utc::now());
        }
        self.csrf_token.clone().expect("token minted above")
    }

    /// Verify a supplied token against the active one
    ///
    /// Fails when no token is active, the active token has expired, or
    /// the bytes differ (constant-time comparison).
    pub fn verify_csrf(&self, supplied: &str, ttl: Duration) -> bool {
        if !self.csrf_is_fresh(ttl) {
            return false;
        }
        let active = self.csrf_token.as_deref().expect("freshness checked");
        platform::csrf::verify_token(active, supplied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: i64 = 3600;

    #[test]
    fn test_guest_session_is_unauthenticated() {
        let session = Session::guest(Some("127.0.0.1".to_string()));
        assert!(!session.is_authenticated());
        assert!(session.account_id.is_none());
    }

    #[test]
    fn test_attach_account_rotates_identity() {
        let mut session = Session::guest(None);
        let pre_login = session.session_id;

        let old = session.attach_account(AccountId::from_i64(7), UserRole::Both);

        assert_eq!(old, pre_login);
        assert_ne!(session.session_id, pre_login);
        assert!(session.is_authenticated());
        assert_eq!(session.role, Some(UserRole::Both));
    }

    #[test]
    fn test_rotation_preserves_csrf_and_account() {
        let mut session = Session::guest(None);
        let token = session.issue_csrf(Duration::seconds(TTL));
        session.attach_account(AccountId::from_i64(7), UserRole::Buyer);

        session.rotate();

        assert_eq!(session.csrf_token.as_deref(), Some(token.as_str()));
        assert_eq!(session.account_id, Some(AccountId::from_i64(7)));
    }

    #[test]
    fn test_needs_rotation_after_interval() {
        let mut session = Session::guest(None);
        assert!(!session.needs_rotation(Duration::seconds(TTL)));

        session.issued_at = Utc::now() - Duration::seconds(TTL + 1);
        assert!(session.needs_rotation(Duration::seconds(TTL)));
    }

    #[test]
    fn test_csrf_issue_is_stable_while_fresh() {
        let mut session = Session::guest(None);
        let first = session.issue_csrf(Duration::seconds(TTL));
        let second = session.issue_csrf(Duration::seconds(TTL));
        assert_eq!(first, second);
    }

    #[test]
    fn test_csrf_reissued_after_expiry() {
        let mut session = Session::guest(None);
        let first = session.issue_csrf(Duration::seconds(TTL));

        session.csrf_issued_at = Some(Utc::now() - Duration::seconds(TTL + 1));
        let second = session.issue_csrf(Duration::seconds(TTL));

        assert_ne!(first, second);
    }

    #[test]
    fn test_csrf_verify() {
        let mut session = Session::guest(None);
        let token = session.issue_csrf(Duration::seconds(TTL));

        assert!(session.verify_csrf(&token, Duration::seconds(TTL)));
        assert!(!session.verify_csrf("tampered", Duration::seconds(TTL)));
    }

    #[test]
    fn test_csrf_expired_token_rejected_even_if_matched() {
        let mut session = Session::guest(None);
        let token = session.issue_csrf(Duration::seconds(TTL));

        session.csrf_issued_at = Some(Utc::now() - Duration::seconds(TTL + 1));
        assert!(!session.verify_csrf(&token, Duration::seconds(TTL)));
    }

    #[test]
    fn test_csrf_from_other_session_rejected() {
        let mut a = Session::guest(None);
        let mut b = Session::guest(None);
        let token_a = a.issue_csrf(Duration::seconds(TTL));
        b.issue_csrf(Duration::seconds(TTL));

        assert!(!b.verify_csrf(&token_a, Duration::seconds(TTL)));
    }
}

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure
//! layer. The storage contract for the failed-attempt counter is spelled
//! out on [`CredentialRepository::record_failure`]: the increment and the
//! conditional lock transition happen atomically in the store, never as
//! a read-modify-write in application code.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entity::{
    account::{Account, NewAccount, ProfileUpdate},
    credential::Credential,
    login_attempt::LoginAttempt,
    session::Session,
};
use crate::domain::value_object::{account_id::AccountId, email::Email};
use crate::error::AuthResult;

/// Outcome of atomically recording a failed attempt
#[derive(Debug, Clone, Copy)]
pub struct FailureOutcome {
    /// Counter value after the increment (zero when the lock fired)
    pub login_attempts: u16,
    /// Whether this failure transitioned the account to Locked
    pub locked: bool,
}

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Persist a new account; the store assigns the id
    async fn create(&self, account: &NewAccount) -> AuthResult<AccountId>;

    /// Find account by ID
    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>>;

    /// Find account by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    /// Check if a username (canonical) or email is already registered
    async fn identity_taken(&self, username_canonical: &str, email: &Email) -> AuthResult<bool>;

    /// Partial profile update; Ok(false) when the id does not exist
    async fn update_profile(
        &self,
        account_id: &AccountId,
        update: &ProfileUpdate,
    ) -> AuthResult<bool>;

    /// Stamp a successful login
    async fn record_login(&self, account_id: &AccountId) -> AuthResult<()>;
}

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Create credentials for a freshly registered account
    async fn create(&self, credential: &Credential) -> AuthResult<()>;

    /// Find credentials by account ID
    async fn find_by_account_id(&self, account_id: &AccountId) -> AuthResult<Option<Credential>>;

    /// Atomically increment the failure counter and lock at the threshold
    ///
    /// Must be a single atomic statement in the store so concurrent
    /// logins against the same account cannot lose updates.
    async fn record_failure(
        &self,
        account_id: &AccountId,
        locked_until: DateTime<Utc>,
    ) -> AuthResult<FailureOutcome>;

    /// Reset counter and lock state after successful authentication
    async fn reset_failures(&self, account_id: &AccountId) -> AuthResult<()>;

    /// Clear an expired lock (and the counter)
    async fn clear_lock(&self, account_id: &AccountId) -> AuthResult<()>;

    /// Replace the password hash
    async fn update_password_hash(
        &self,
        account_id: &AccountId,
        phc_string: &str,
    ) -> AuthResult<()>;
}

/// Login attempt audit-trail repository trait
#[trait_variant::make(LoginAttemptRepository: Send)]
pub trait LocalLoginAttemptRepository {
    /// Append one attempt record (never updated or deleted)
    async fn record(&self, attempt: &LoginAttempt) -> AuthResult<()>;

    /// Count attempts for an identifier since `cutoff`
    async fn count_for_identifier(&self, email: &str, cutoff: DateTime<Utc>) -> AuthResult<u32>;

    /// Count attempts from an origin address since `cutoff`
    async fn count_for_origin(&self, ip_address: &str, cutoff: DateTime<Utc>) -> AuthResult<u32>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session row
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Find session by identity
    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<Session>>;

    /// Update mutable fields (CSRF token, activity) in place
    async fn update(&self, session: &Session) -> AuthResult<()>;

    /// Persist a rotation: the row keyed by `old_id` takes on all of
    /// `session`'s current fields, including its new identity
    async fn replace_id(&self, old_id: Uuid, session: &Session) -> AuthResult<()>;

    /// Delete a session (logout)
    async fn delete(&self, session_id: Uuid) -> AuthResult<()>;

    /// Remove sessions idle since before `cutoff`; returns rows deleted
    async fn cleanup_stale(&self, cutoff: DateTime<Utc>) -> AuthResult<u64>;
}

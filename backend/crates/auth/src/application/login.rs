//! Login Use Case
//!
//! Authenticates an account and binds it to the caller's session.
//!
//! Order of checks, outermost first:
//! 1. rate-limit window per identifier (before the account is looked up,
//!    so nonexistent emails cannot be enumerated faster than real ones)
//! 2. rate-limit window per origin address
//! 3. account lookup; a miss is reported as plain invalid credentials
//! 4. lockout state machine (expired locks clear here)
//! 5. password verification; failures are counted atomically in the
//!    store and may trigger the lock
//!
//! Every attempt that reaches step 3 appends one audit record, success
//! or failure.

use std::net::IpAddr;
use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::entity::account::Account;
use crate::domain::entity::credential::Credential;
use crate::domain::entity::login_attempt::LoginAttempt;
use crate::domain::entity::session::Session;
use crate::domain::repository::{
    AccountRepository, CredentialRepository, LoginAttemptRepository, SessionRepository,
};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub account: Account,
    /// The caller's session, rotated and bound to the account
    pub session: Session,
}

/// Login use case
pub struct LoginUseCase<A, C, L, S>
where
    A: AccountRepository,
    C: CredentialRepository,
    L: LoginAttemptRepository,
    S: SessionRepository,
{
    account_repo: Arc<A>,
    credential_repo: Arc<C>,
    attempt_repo: Arc<L>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<A, C, L, S> LoginUseCase<A, C, L, S>
where
    A: AccountRepository,
    C: CredentialRepository,
    L: LoginAttemptRepository,
    S: SessionRepository,
{
    pub fn new(
        account_repo: Arc<A>,
        credential_repo: Arc<C>,
        attempt_repo: Arc<L>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            account_repo,
            credential_repo,
            attempt_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: LoginInput,
        origin: Option<IpAddr>,
        mut session: Session,
    ) -> AuthResult<LoginOutput> {
        let identifier = input.email.trim().to_lowercase();
        let origin = platform::client::origin_string(origin);

        self.check_rate_limits(&identifier, &origin).await?;

        // A miss must look exactly like a wrong password
        let account = match Email::new(identifier.as_str()) {
            Ok(email) => self.account_repo.find_by_email(&email).await?,
            Err(_) => None,
        };
        let Some(account) = account else {
            self.record_attempt(&identifier, &origin, false).await;
            return Err(AuthError::InvalidCredentials { remaining: None });
        };

        let mut credential = self
            .credential_repo
            .find_by_account_id(&account.account_id)
            .await?
            .ok_or_else(|| AuthError::Internal("Credential row missing".to_string()))?;

        // Lockout state machine: expired locks clear on any check
        if credential.is_locked() {
            return Err(AuthError::AccountLocked);
        }
        if credential.clear_expired_lock() {
            self.credential_repo
                .clear_lock(&account.account_id)
                .await?;
        }

        let verified = match RawPassword::new(input.password) {
            Ok(raw) => credential
                .password_hash
                .verify(&raw, self.config.pepper()),
            // A secret the policy would never have admitted cannot match
            Err(_) => false,
        };

        if !verified {
            let locked_until =
                Utc::now() + chrono::Duration::seconds(Credential::LOCKOUT_SECS);
            let outcome = self
                .credential_repo
                .record_failure(&account.account_id, locked_until)
                .await?;

            self.record_attempt(&identifier, &origin, false).await;

            if outcome.locked {
                tracing::warn!(account_id = %account.account_id, "Account locked after repeated failures");
                return Err(AuthError::AccountLocked);
            }
            return Err(AuthError::InvalidCredentials {
                remaining: Some(
                    Credential::MAX_LOGIN_ATTEMPTS.saturating_sub(outcome.login_attempts),
                ),
            });
        }

        // Success: reset protection state, stamp the login, audit it
        self.credential_repo
            .reset_failures(&account.account_id)
            .await?;
        self.account_repo.record_login(&account.account_id).await?;
        self.record_attempt(&identifier, &origin, true).await;

        // Fixation defense: new identity for the now-authenticated session
        let old_id = session.attach_account(account.account_id, account.role);
        self.session_repo.replace_id(old_id, &session).await?;

        tracing::info!(
            account_id = %account.account_id,
            session_id = %session.session_id,
            "Login successful"
        );

        Ok(LoginOutput { account, session })
    }

    /// Reject before the account lookup when either window is exhausted
    async fn check_rate_limits(&self, identifier: &str, origin: &str) -> AuthResult<()> {
        let cutoff = Utc::now() - self.config.rate_limit_window();

        let by_identifier = self
            .attempt_repo
            .count_for_identifier(identifier, cutoff)
            .await?;
        if !self.config.login_rate_limit.evaluate(by_identifier).allowed {
            return Err(AuthError::RateLimited);
        }

        let by_origin = self.attempt_repo.count_for_origin(origin, cutoff).await?;
        if !self.config.login_rate_limit.evaluate(by_origin).allowed {
            return Err(AuthError::RateLimited);
        }

        Ok(())
    }

    /// Append an audit record; failure to audit never fails the login
    async fn record_attempt(&self, identifier: &str, origin: &str, success: bool) {
        let attempt = LoginAttempt::now(identifier, origin, success);
        if let Err(e) = self.attempt_repo.record(&attempt).await {
            tracing::error!(error = %e, "Failed to record login attempt");
        }
    }
}

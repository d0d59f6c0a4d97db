//! Register Use Case
//!
//! Creates a new account and signs it in on the caller's session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::account::NewAccount;
use crate::domain::entity::credential::Credential;
use crate::domain::entity::session::Session;
use crate::domain::repository::{AccountRepository, CredentialRepository, SessionRepository};
use crate::domain::value_object::{
    account_id::AccountId, email::Email, user_password::{RawPassword, UserPassword},
    user_role::UserRole, username::Username,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub phone: String,
    pub location: String,
    /// Role code; anything unknown falls back to the default
    pub role: Option<String>,
}

/// Register output
pub struct RegisterOutput {
    pub account_id: AccountId,
    /// The caller's session, now bound to the new account
    pub session: Session,
}

/// Register use case
pub struct RegisterUseCase<A, C, S>
where
    A: AccountRepository,
    C: CredentialRepository,
    S: SessionRepository,
{
    account_repo: Arc<A>,
    credential_repo: Arc<C>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<A, C, S> RegisterUseCase<A, C, S>
where
    A: AccountRepository,
    C: CredentialRepository,
    S: SessionRepository,
{
    pub fn new(
        account_repo: Arc<A>,
        credential_repo: Arc<C>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            account_repo,
            credential_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: RegisterInput,
        mut session: Session,
    ) -> AuthResult<RegisterOutput> {
        // Validation happens before the store is touched
        let username = Username::new(input.username)?;
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;
        let role = input
            .role
            .as_deref()
            .and_then(UserRole::from_code)
            .unwrap_or_default();

        if self
            .account_repo
            .identity_taken(username.canonical(), &email)
            .await?
        {
            return Err(AuthError::IdentityTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let new_account = NewAccount {
            username,
            email,
            display_name: input.display_name.trim().to_string(),
            phone: input.phone.trim().to_string(),
            location: input.location.trim().to_string(),
            role,
        };

        let account_id = self.account_repo.create(&new_account).await?;

        self.credential_repo
            .create(&Credential::new(account_id, password_hash))
            .await?;

        // Sign the fresh account in on the caller's session
        let old_id = session.attach_account(account_id, role);
        self.session_repo.replace_id(old_id, &session).await?;

        tracing::info!(
            account_id = %account_id,
            username = %new_account.username,
            role = %role,
            "Account registered"
        );

        Ok(RegisterOutput {
            account_id,
            session,
        })
    }
}

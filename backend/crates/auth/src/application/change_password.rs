//! Change Password Use Case
//!
//! Replaces the account secret after verifying the current one.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{
    account_id::AccountId, user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<C>
where
    C: CredentialRepository,
{
    credential_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<C> ChangePasswordUseCase<C>
where
    C: CredentialRepository,
{
    pub fn new(credential_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            credential_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        account_id: AccountId,
        input: ChangePasswordInput,
    ) -> AuthResult<()> {
        // The new secret must pass policy before anything is read
        let new_password = RawPassword::new(input.new_password)?;

        let credential = self
            .credential_repo
            .find_by_account_id(&account_id)
            .await?
            .ok_or(AuthError::NotFound("Account"))?;

        // A current secret the policy would never have admitted cannot match
        let current_verified = match RawPassword::new(input.current_password) {
            Ok(raw) => credential.password_hash.verify(&raw, self.config.pepper()),
            Err(_) => false,
        };
        if !current_verified {
            return Err(AuthError::PasswordMismatch);
        }

        let new_hash = UserPassword::from_raw(&new_password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        self.credential_repo
            .update_password_hash(&account_id, new_hash.as_phc_string())
            .await?;

        tracing::info!(account_id = %account_id, "Password changed");
        Ok(())
    }
}

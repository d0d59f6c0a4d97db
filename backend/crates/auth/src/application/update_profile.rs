//! Update Profile Use Case
//!
//! Partial profile update; omitted fields keep their stored values.

use std::sync::Arc;

use crate::domain::entity::account::ProfileUpdate;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AuthError, AuthResult};

/// Update profile use case
pub struct UpdateProfileUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
}

impl<A> UpdateProfileUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>) -> Self {
        Self { account_repo }
    }

    pub async fn execute(&self, account_id: AccountId, update: ProfileUpdate) -> AuthResult<()> {
        if update.is_empty() {
            // Nothing to write, but the id must still exist
            self.account_repo
                .find_by_id(&account_id)
                .await?
                .ok_or(AuthError::NotFound("Account"))?;
            return Ok(());
        }

        let updated = self
            .account_repo
            .update_profile(&account_id, &update)
            .await?;
        if !updated {
            return Err(AuthError::NotFound("Account"));
        }

        tracing::info!(account_id = %account_id, "Profile updated");
        Ok(())
    }
}

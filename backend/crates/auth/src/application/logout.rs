//! Logout Use Case
//!
//! Destroys the session row; the cookie is cleared by the handler.
//! Subsequent requests with the old token are unauthenticated.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        let session_id = session_token::parse(token, &self.config.session_secret)?;
        self.session_repo.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "Session destroyed");
        Ok(())
    }
}

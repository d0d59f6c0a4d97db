//! Check Session Use Case
//!
//! Verifies the signed cookie token, loads the session, and applies
//! sliding renewal: an identity older than the rotation interval is
//! rotated in place and the timer reset; the session itself survives.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

/// A session after the renewal check
#[derive(Debug)]
pub struct RenewedSession {
    pub session: Session,
    /// New signed cookie token when the identity was rotated
    pub reissued_token: Option<String>,
}

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Load the session behind a token, renewing an aged identity
    pub async fn get_session(&self, token: &str) -> AuthResult<RenewedSession> {
        let session_id = session_token::parse(token, &self.config.session_secret)?;

        let mut session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        session.touch();

        if session.needs_rotation(self.config.rotation_interval()) {
            let old_id = session.rotate();
            // Rotation must land before the response carries the new cookie
            self.session_repo.replace_id(old_id, &session).await?;

            tracing::debug!(
                old_session_id = %old_id,
                session_id = %session.session_id,
                "Session identity rotated on age"
            );

            let reissued = session_token::sign(session.session_id, &self.config.session_secret);
            return Ok(RenewedSession {
                session,
                reissued_token: Some(reissued),
            });
        }

        // Activity update can happen off the request path
        let session_clone = session.clone();
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update(&session_clone).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(RenewedSession {
            session,
            reissued_token: None,
        })
    }

    /// Load the session and require an account binding
    pub async fn get_authenticated(&self, token: &str) -> AuthResult<RenewedSession> {
        let renewed = self.get_session(token).await?;
        if !renewed.session.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }
        Ok(renewed)
    }
}

//! CSRF Token Use Case
//!
//! Issues the session's anti-forgery token, minting a guest session
//! when the caller has none yet. Registration and login are themselves
//! mutating requests, so the token must be obtainable before any
//! authentication happens.

use std::net::IpAddr;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// CSRF issue output
pub struct CsrfTokenOutput {
    pub csrf_token: String,
    /// Signed cookie token when a guest session was minted
    pub new_session_token: Option<String>,
}

/// CSRF token use case
pub struct CsrfTokenUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CsrfTokenUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        cookie_token: Option<String>,
        origin: Option<IpAddr>,
    ) -> AuthResult<CsrfTokenOutput> {
        // Reuse the caller's session when the cookie checks out
        let existing = match cookie_token {
            Some(token) => {
                match session_token::parse(&token, &self.config.session_secret) {
                    Ok(session_id) => self.session_repo.find_by_id(session_id).await?,
                    Err(_) => None,
                }
            }
            None => None,
        };

        match existing {
            Some(mut session) => {
                let csrf_token = session.issue_csrf(self.config.csrf_ttl());
                session.touch();
                self.session_repo.update(&session).await?;

                Ok(CsrfTokenOutput {
                    csrf_token,
                    new_session_token: None,
                })
            }
            None => {
                let mut session = Session::guest(origin.map(|ip| ip.to_string()));
                let csrf_token = session.issue_csrf(self.config.csrf_ttl());
                self.session_repo.create(&session).await?;

                tracing::debug!(session_id = %session.session_id, "Guest session created");

                let cookie =
                    session_token::sign(session.session_id, &self.config.session_secret);
                Ok(CsrfTokenOutput {
                    csrf_token,
                    new_session_token: Some(cookie),
                })
            }
        }
    }
}

//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Account registration and login with email + password
//! - Server-side sessions with HMAC-signed cookie tokens
//! - Session identity rotation on login and on age (fixation defense)
//! - Per-session anti-forgery (CSRF) tokens on all mutating requests
//! - Role tagging (buyer, seller, both) for the marketplace
//!
//! ## Security Model
//! - Passwords hashed with Argon2id at a fixed, explicit work factor
//! - Automatic lockout after failed login attempts (30 minute lock)
//! - Pre-lookup rate limiting over the login-attempt audit trail, keyed
//!   by identifier and by origin address
//! - Every verification attempt appends an immutable audit record

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

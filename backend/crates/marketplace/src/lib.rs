//! Marketplace Backend Module
//!
//! Catalog, cart/checkout and buyer-seller messaging. These are plain
//! data-access operations; everything security-relevant (sessions, CSRF,
//! roles) is delegated to the `auth` crate's middleware and session
//! state.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, read models, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL implementations
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::MarketConfig;
pub use error::{MarketError, MarketResult};
pub use infra::postgres::PgMarketRepository;
pub use presentation::router::market_router;

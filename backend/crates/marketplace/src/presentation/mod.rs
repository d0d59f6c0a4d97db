//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::MarketAppState;
pub use router::{market_router, market_router_generic};

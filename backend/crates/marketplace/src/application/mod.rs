//! Application Layer
//!
//! Use cases and configuration.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod messaging;

// Re-exports
pub use cart::CartUseCase;
pub use catalog::{AddProductInput, CatalogUseCase, UpdateProductInput};
pub use config::MarketConfig;
pub use messaging::{MessagingUseCase, SendMessageInput};

//! Domain Layer

pub mod entities;
pub mod repository;

pub use entities::*;
pub use repository::{CartRepository, CatalogRepository, MessageRepository};

//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (secure randomness, Base64, constant-time compare)
//! - Password hashing (Argon2id with an explicit, fixed work factor)
//! - Anti-forgery (CSRF) token generation and verification
//! - Cookie management
//! - Rate limiting vocabulary
//! - Client origin identification

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod csrf;
pub mod password;
pub mod rate_limit;

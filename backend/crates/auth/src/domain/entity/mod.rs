//! Entity Module

pub mod account;
pub mod credential;
pub mod login_attempt;
pub mod session;

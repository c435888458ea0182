//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Email/password registration and login
//! - Token issuance and verification
//! - The `AuthedUser` extractor guarding owner-scoped routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod password;
pub mod routes;
pub mod tokens;
pub mod validators;

#[cfg(test)]
mod tests;

pub use extractors::{AuthedUser, MaybeAuthedUser};
pub use routes::auth_routes;

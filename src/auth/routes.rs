//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /auth/register` - Create an account
/// - `POST /auth/login` - Email/password login
/// - `GET /auth/me` - Current user information
pub fn auth_routes() -> Router {
    Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/me", get(handlers::me_handler))
}

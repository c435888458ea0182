// src/favorites/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// # Routes
/// - `GET /favorites` - List favorites in insertion order
/// - `POST /favorites` - Add a favorite
/// - `GET /favorites/cards` - Favorites as movie cards
/// - `GET /favorites/:movieId` - Is this movie a favorite
/// - `DELETE /favorites/:movieId` - Remove a favorite
pub fn favorites_routes() -> Router {
    Router::new()
        .route(
            "/favorites",
            get(handlers::list_favorites).post(handlers::add_favorite),
        )
        .route("/favorites/cards", get(handlers::favorite_cards))
        .route(
            "/favorites/:movie_id",
            get(handlers::favorite_status).delete(handlers::remove_favorite),
        )
}

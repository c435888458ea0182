// src/movies/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// # Routes
/// - `GET /movies/popular` - Popular movies (favorite overlay when authenticated)
/// - `GET /movies/search` - Search; blank query falls back to popular
/// - `GET /movies/:id` - Single movie card with details
/// - `POST /movies/:id/favorite` - Toggle favorite (authenticated)
pub fn movies_routes() -> Router {
    Router::new()
        .route("/movies/popular", get(handlers::popular_movies))
        .route("/movies/search", get(handlers::search_movies))
        .route("/movies/:id", get(handlers::movie_details))
        .route("/movies/:id/favorite", post(handlers::toggle_favorite))
}

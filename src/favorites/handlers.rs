// src/favorites/handlers.rs
//! Favorites handlers. Every route acts on the authenticated user's own list.

use axum::{
    extract::Extension,
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use super::models::{AddFavoriteRequest, Favorite, FavoriteStatus};
use super::validators::{coerce_movie_id, AddFavoriteValidator};
use crate::auth::AuthedUser;
use crate::common::{ApiError, ApiJson, ApiPath, SharedState, Validator};
use crate::movies::cards::{card_from_favorite, MovieCard};

/// GET /favorites
pub async fn list_favorites(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<Vec<Favorite>>, ApiError> {
    let state = state_lock.read().await.clone();
    let favorites = state.store.list_favorites(&authed.id).await?;
    Ok(Json(favorites))
}

/// POST /favorites
/// Appends a movie to the list; 400 if it is already there
pub async fn add_favorite(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    ApiJson(payload): ApiJson<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<Vec<Favorite>>), ApiError> {
    let validation = AddFavoriteValidator.validate(&payload);
    if !validation.is_valid {
        return Err(validation.into());
    }
    let favorite = payload.into_new_favorite().ok_or_else(|| {
        ApiError::InternalServer("validated favorite missing required fields".to_string())
    })?;

    let state = state_lock.read().await.clone();
    let favorites = state.store.add_favorite(&authed.id, &favorite).await?;

    info!(user_id = %authed.id, movie_id = favorite.movie_id, "Favorite added");
    Ok((StatusCode::CREATED, Json(favorites)))
}

/// DELETE /favorites/:movieId
/// Idempotent; a movie that is not in the list leaves it unchanged
pub async fn remove_favorite(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    ApiPath(raw_movie_id): ApiPath<String>,
) -> Result<Json<Vec<Favorite>>, ApiError> {
    let state = state_lock.read().await.clone();

    let favorites = match coerce_movie_id(&raw_movie_id) {
        Some(movie_id) => {
            let favorites = state.store.remove_favorite(&authed.id, movie_id).await?;
            info!(user_id = %authed.id, movie_id = movie_id, "Favorite removed");
            favorites
        }
        None => {
            debug!(raw = %raw_movie_id, "Non-numeric movie id matches no favorite");
            state.store.list_favorites(&authed.id).await?
        }
    };

    Ok(Json(favorites))
}

/// GET /favorites/:movieId
pub async fn favorite_status(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    ApiPath(raw_movie_id): ApiPath<String>,
) -> Result<Json<FavoriteStatus>, ApiError> {
    let movie_id = coerce_movie_id(&raw_movie_id)
        .ok_or_else(|| ApiError::BadRequest("movieId must be an integer".to_string()))?;

    let state = state_lock.read().await.clone();
    let is_favorite = state.store.is_favorite(&authed.id, movie_id).await?;

    Ok(Json(FavoriteStatus {
        movie_id,
        is_favorite,
    }))
}

/// GET /favorites/cards
/// The favorites list shaped as movie cards, as the favorites page shows it
pub async fn favorite_cards(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<Vec<MovieCard>>, ApiError> {
    let state = state_lock.read().await.clone();
    let favorites = state.store.list_favorites(&authed.id).await?;

    let cards = favorites
        .iter()
        .map(|f| card_from_favorite(&state.catalog, f))
        .collect();
    Ok(Json(cards))
}

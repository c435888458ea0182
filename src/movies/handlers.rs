// src/movies/handlers.rs
//! Catalog browsing with the caller's favorites overlaid, plus the favorite toggle

use axum::{
    extract::Extension,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

use super::cards::{detail_card, favorite_from_catalog, overlay_page, CardPage, MovieDetailCard};
use crate::auth::{AuthedUser, MaybeAuthedUser};
use crate::common::{ApiError, ApiPath, ApiQuery, AppState, SharedState};
use crate::favorites::models::Favorite;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub movie_id: i64,
    pub is_favorite: bool,
    pub favorites: Vec<Favorite>,
}

async fn favorite_ids(state: &AppState, user: &MaybeAuthedUser) -> Result<HashSet<i64>, ApiError> {
    match &user.0 {
        Some(authed) => Ok(state
            .store
            .list_favorites(&authed.id)
            .await?
            .into_iter()
            .map(|f| f.movie_id)
            .collect()),
        None => Ok(HashSet::new()),
    }
}

/// GET /movies/popular?page=
pub async fn popular_movies(
    Extension(state_lock): Extension<SharedState>,
    user: MaybeAuthedUser,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<CardPage>, ApiError> {
    let state = state_lock.read().await.clone();
    let page = state.catalog.popular_movies(params.page.unwrap_or(1)).await?;
    let favorites = favorite_ids(&state, &user).await?;

    Ok(Json(overlay_page(&state.catalog, &page, &favorites)))
}

/// GET /movies/search?query=&page=
/// A blank query falls back to the popular list
pub async fn search_movies(
    Extension(state_lock): Extension<SharedState>,
    user: MaybeAuthedUser,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<CardPage>, ApiError> {
    let state = state_lock.read().await.clone();
    let page_number = params.page.unwrap_or(1);

    let page = match params.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => state.catalog.search_movies(query, page_number).await?,
        None => state.catalog.popular_movies(page_number).await?,
    };
    let favorites = favorite_ids(&state, &user).await?;

    Ok(Json(overlay_page(&state.catalog, &page, &favorites)))
}

/// GET /movies/:id
pub async fn movie_details(
    Extension(state_lock): Extension<SharedState>,
    user: MaybeAuthedUser,
    ApiPath(movie_id): ApiPath<i64>,
) -> Result<Json<MovieDetailCard>, ApiError> {
    let state = state_lock.read().await.clone();
    let details = state.catalog.movie_details(movie_id).await?;

    let is_favorite = match &user.0 {
        Some(authed) => state.store.is_favorite(&authed.id, movie_id).await?,
        None => false,
    };

    Ok(Json(detail_card(&state.catalog, &details, is_favorite)))
}

/// POST /movies/:id/favorite
/// Removes the movie if it is a favorite, otherwise adds it with metadata
/// fetched from the catalog
pub async fn toggle_favorite(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    ApiPath(movie_id): ApiPath<i64>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    if state.store.is_favorite(&authed.id, movie_id).await? {
        let favorites = state.store.remove_favorite(&authed.id, movie_id).await?;
        info!(user_id = %authed.id, movie_id = movie_id, "Favorite toggled off");
        return Ok(Json(ToggleResponse {
            movie_id,
            is_favorite: false,
            favorites,
        }));
    }

    let details = state.catalog.movie_details(movie_id).await?;
    let favorites = state
        .store
        .add_favorite(&authed.id, &favorite_from_catalog(&details.movie))
        .await?;
    info!(user_id = %authed.id, movie_id = movie_id, "Favorite toggled on");

    Ok(Json(ToggleResponse {
        movie_id,
        is_favorite: true,
        favorites,
    }))
}

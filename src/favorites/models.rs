//! Favorite data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A saved movie with the display metadata cached at add time
#[derive(FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub movie_id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: String,
    pub release_date: String,
    pub vote_average: f64,
    pub added_at: String,
}

/// Body of `POST /favorites`
///
/// Every field is optional at the serde level so that missing fields come
/// back as per-field validation errors instead of a bare JSON rejection.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub movie_id: Option<i64>,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

/// A validated favorite ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewFavorite {
    pub movie_id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: String,
    pub release_date: String,
    pub vote_average: f64,
}

impl AddFavoriteRequest {
    /// Call only after validation has passed
    pub fn into_new_favorite(self) -> Option<NewFavorite> {
        Some(NewFavorite {
            movie_id: self.movie_id?,
            title: self.title?.trim().to_string(),
            poster_path: self.poster_path.filter(|p| !p.trim().is_empty()),
            overview: self.overview.unwrap_or_default(),
            release_date: self.release_date.unwrap_or_default(),
            vote_average: self.vote_average.unwrap_or(0.0),
        })
    }
}

/// Response of `GET /favorites/:movieId`
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub movie_id: i64,
    pub is_favorite: bool,
}

// src/movies/cards.rs
//! Movie card view models and the favorite overlay

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::favorites::models::{Favorite, NewFavorite};
use crate::services::catalog::{CatalogClient, CatalogMovie, MovieDetails, MoviePage, DEFAULT_IMAGE_SIZE};

/// Shown when the catalog has no poster for a movie
pub const POSTER_PLACEHOLDER_URL: &str = "https://via.placeholder.com/500x750?text=No+Image";

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieCard {
    pub id: i64,
    pub title: String,
    pub poster_url: String,
    pub year: String,
    pub rating: String,
    pub overview: String,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPage {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub results: Vec<MovieCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetailCard {
    #[serde(flatten)]
    pub card: MovieCard,
    pub genres: Vec<String>,
    pub runtime: Option<u32>,
    pub tagline: Option<String>,
}

/// Release year from a `YYYY-MM-DD` date, `"N/A"` when missing or malformed
pub fn release_year(release_date: Option<&str>) -> String {
    release_date
        .and_then(|d| d.get(..4))
        .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `"7.3/10"`, or `"N/A"` for unrated movies
pub fn rating_label(vote_average: f64) -> String {
    if vote_average > 0.0 && vote_average.is_finite() {
        format!("{:.1}/10", vote_average)
    } else {
        NOT_AVAILABLE.to_string()
    }
}

fn poster_url(catalog: &CatalogClient, poster_path: Option<&str>) -> String {
    catalog
        .image_url(poster_path, DEFAULT_IMAGE_SIZE)
        .unwrap_or_else(|| POSTER_PLACEHOLDER_URL.to_string())
}

pub fn card_from_catalog(catalog: &CatalogClient, movie: &CatalogMovie, is_favorite: bool) -> MovieCard {
    MovieCard {
        id: movie.id,
        title: movie.title.clone(),
        poster_url: poster_url(catalog, movie.poster_path.as_deref()),
        year: release_year(movie.release_date.as_deref()),
        rating: rating_label(movie.vote_average),
        overview: movie.overview.clone().unwrap_or_default(),
        is_favorite,
    }
}

/// A saved favorite rendered from its cached metadata; always marked favorite
pub fn card_from_favorite(catalog: &CatalogClient, favorite: &Favorite) -> MovieCard {
    MovieCard {
        id: favorite.movie_id,
        title: favorite.title.clone(),
        poster_url: poster_url(catalog, favorite.poster_path.as_deref()),
        year: release_year(Some(favorite.release_date.as_str())),
        rating: rating_label(favorite.vote_average),
        overview: favorite.overview.clone(),
        is_favorite: true,
    }
}

/// Merge a catalog page with the caller's favorite movie IDs
pub fn overlay_page(catalog: &CatalogClient, page: &MoviePage, favorite_ids: &HashSet<i64>) -> CardPage {
    CardPage {
        page: page.page,
        total_pages: page.total_pages,
        total_results: page.total_results,
        results: page
            .results
            .iter()
            .map(|m| card_from_catalog(catalog, m, favorite_ids.contains(&m.id)))
            .collect(),
    }
}

pub fn detail_card(catalog: &CatalogClient, details: &MovieDetails, is_favorite: bool) -> MovieDetailCard {
    MovieDetailCard {
        card: card_from_catalog(catalog, &details.movie, is_favorite),
        genres: details.genres.iter().map(|g| g.name.clone()).collect(),
        runtime: details.runtime,
        tagline: details.tagline.clone().filter(|t| !t.is_empty()),
    }
}

/// The metadata cached when a catalog movie is added to favorites.
/// The vote average is clamped into the 0 to 10 range favorites accept.
pub fn favorite_from_catalog(movie: &CatalogMovie) -> NewFavorite {
    NewFavorite {
        movie_id: movie.id,
        title: movie.title.clone(),
        poster_path: movie.poster_path.clone().filter(|p| !p.is_empty()),
        overview: movie.overview.clone().unwrap_or_default(),
        release_date: movie.release_date.clone().unwrap_or_default(),
        vote_average: if movie.vote_average.is_finite() {
            movie.vote_average.clamp(0.0, 10.0)
        } else {
            0.0
        },
    }
}

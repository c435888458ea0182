// src/services/catalog.rs
//! Read-only client for the TMDB v3 movie catalog

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Poster size used for cards
pub const DEFAULT_IMAGE_SIZE: &str = "w500";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogMovie {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

/// One page of search or popular results, as paginated by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<CatalogMovie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: CatalogMovie,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    pub tagline: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Movie {0} not found in catalog")]
    NotFound(i64),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
    api_key: String,
    image_base_url: String,
}

impl CatalogClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        image_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            image_base_url: image_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Full-text movie search
    pub async fn search_movies(&self, query: &str, page: u32) -> Result<MoviePage, CatalogError> {
        debug!(query = %query, page = page, "Searching catalog");
        let page = page.max(1).to_string();
        let result: MoviePage = self
            .get_json("/search/movie", &[("query", query), ("page", &page)])
            .await?;
        info!(query = %query, results = result.results.len(), "Catalog search completed");
        Ok(result)
    }

    /// The provider's current popular list
    pub async fn popular_movies(&self, page: u32) -> Result<MoviePage, CatalogError> {
        debug!(page = page, "Fetching popular movies");
        let page = page.max(1).to_string();
        self.get_json("/movie/popular", &[("page", &page)]).await
    }

    pub async fn movie_details(&self, movie_id: i64) -> Result<MovieDetails, CatalogError> {
        debug!(movie_id = movie_id, "Fetching movie details");
        match self.get_json(&format!("/movie/{}", movie_id), &[]).await {
            Err(CatalogError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Err(CatalogError::NotFound(movie_id))
            }
            other => other,
        }
    }

    /// Fully qualified image URL, or `None` when the movie has no image
    pub fn image_url(&self, path: Option<&str>, size: &str) -> Option<String> {
        build_image_url(&self.image_base_url, path, size)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, endpoint = %endpoint, "HTTP error contacting catalog");
                CatalogError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            if status != StatusCode::NOT_FOUND {
                error!(http_status = %status, endpoint = %endpoint, "Catalog API error: {}", error_text);
            }
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body: error_text,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))
    }
}

/// `{base}/{size}{path}`; `None` when `path` is absent or blank
pub fn build_image_url(base: &str, path: Option<&str>, size: &str) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    let separator = if path.starts_with('/') { "" } else { "/" };
    Some(format!("{}/{}{}{}", base.trim_end_matches('/'), size, separator, path))
}

// src/common/config.rs
//! Runtime configuration read from the environment (and `.env` via dotenv)

use std::env;
use std::time::Duration;
use tracing::warn;

const DEV_JWT_SECRET: &str = "replace_with_strong_secret";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub request_timeout: Duration,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://favorites.db".to_string());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if cfg!(debug_assertions) => {
                warn!("JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
            _ => anyhow::bail!("JWT_SECRET must be set"),
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let tmdb_api_key = env::var("TMDB_API_KEY").unwrap_or_default();
        if tmdb_api_key.is_empty() {
            warn!("TMDB_API_KEY not set, catalog requests will be rejected upstream");
        }

        let tmdb_base_url = env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());
        let tmdb_image_base_url = env::var("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|_| "https://image.tmdb.org/t/p".to_string());

        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        let bcrypt_cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(bcrypt::DEFAULT_COST);

        Ok(Self {
            database_url,
            jwt_secret,
            port,
            cors_origins,
            tmdb_api_key,
            tmdb_base_url,
            tmdb_image_base_url,
            request_timeout,
            bcrypt_cost,
        })
    }
}

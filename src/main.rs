// src/main.rs
use dotenv::dotenv;
use reqwest::Client;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::PathBuf;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod app;
mod auth;
mod common;
mod favorites;
mod logging_middleware;
mod movies;
mod services;

use auth::tokens::TokenService;
use common::{AppState, Config};
use services::{CatalogClient, SqliteCredentialStore};

#[cfg(test)]
mod test_support;

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env()?;

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    if let Some(path_part) = config.database_url.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .acquire_timeout(config.request_timeout)
        .connect_with(connect_options)
        .await?;

    common::migrations::run_migrations(&pool).await?;

    // ========================================================================
    // SERVICE INITIALIZATION
    // ========================================================================

    let http_client = Client::builder()
        .timeout(config.request_timeout)
        .build()?;

    let catalog = CatalogClient::new(
        http_client,
        config.tmdb_base_url.clone(),
        config.tmdb_api_key.clone(),
        config.tmdb_image_base_url.clone(),
    );
    info!(base_url = %config.tmdb_base_url, "CatalogClient initialized");

    let store = Arc::new(SqliteCredentialStore::new(pool, config.bcrypt_cost));
    let tokens = TokenService::new(&config.jwt_secret);

    let shared = AppState::new(store, tokens, catalog).into_shared();

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let app = app::build_router(shared, &config.cors_origins, config.request_timeout);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

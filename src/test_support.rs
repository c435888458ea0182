// src/test_support.rs
//! Helpers for driving the full router in tests

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use reqwest::Client;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use crate::app::build_router;
use crate::auth::tokens::TokenService;
use crate::common::migrations::create_schema;
use crate::common::{AppState, SharedState};
use crate::services::{CatalogClient, SqliteCredentialStore};

pub const TEST_SECRET: &str = "test_secret_key";

/// Router backed by an in-memory database and a catalog at `catalog_base_url`
pub async fn test_app_with_catalog(catalog_base_url: &str) -> (Router, SharedState) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    create_schema(&pool).await.unwrap();

    let store = Arc::new(SqliteCredentialStore::new(pool, 4));
    let catalog = CatalogClient::new(
        Client::new(),
        catalog_base_url,
        "test-key",
        "https://image.tmdb.org/t/p",
    );
    let shared = AppState::new(store, TokenService::new(TEST_SECRET), catalog).into_shared();

    let app = build_router(shared.clone(), &[], Duration::from_secs(10));
    (app, shared)
}

/// Router whose catalog points nowhere; for tests that never reach it
pub async fn test_app() -> (Router, SharedState) {
    test_app_with_catalog("http://127.0.0.1:9").await
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Register a user and return its token
pub async fn register(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

pub fn favorite_body(movie_id: i64) -> Value {
    serde_json::json!({
        "movieId": movie_id,
        "title": format!("Movie {}", movie_id),
        "posterPath": format!("/p{}.jpg", movie_id),
        "overview": "Overview",
        "releaseDate": "2020-05-01",
        "voteAverage": 7.4
    })
}

pub fn movie_ids(favorites: &Value) -> Vec<i64> {
    favorites
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["movieId"].as_i64().unwrap())
        .collect()
}

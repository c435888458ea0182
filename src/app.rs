// src/app.rs
//! Router composition shared by `main` and the route tests

use axum::{
    extract::Extension,
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::common::{ApiError, SharedState};
use crate::{auth, favorites, logging_middleware, movies};

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `TimeoutLayer` answers with an empty 408; give it the usual error body
async fn timeout_as_json(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        ApiError::Timeout.into_response()
    } else {
        response
    }
}

pub fn build_router(shared: SharedState, cors_origins: &[String], request_timeout: Duration) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        // ====================================================================
        // AUTHENTICATION ROUTES
        // ====================================================================
        .merge(auth::auth_routes())
        // ====================================================================
        // FAVORITES ROUTES (owner-scoped)
        // ====================================================================
        .merge(favorites::favorites_routes())
        // ====================================================================
        // MOVIE CATALOG ROUTES
        // ====================================================================
        .merge(movies::movies_routes())
        .route("/health", get(health))
        // ====================================================================
        // MIDDLEWARE AND LAYERS
        // ====================================================================
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(shared))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::map_response(timeout_as_json))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

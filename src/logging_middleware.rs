// src/logging_middleware.rs
//! Debug-level request/response body logging with credentials masked

use axum::body::{to_bytes, Body, Bytes};
use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::{debug, enabled, Level};

use crate::common::helpers::redact_sensitive;

/// Bodies above this size are passed through without being logged
const MAX_LOGGED_BODY: usize = 64 * 1024;

/// Render a body for the log. JSON is pretty-printed with `password` and
/// `token` values replaced; anything else is logged as text.
fn render_body(bytes: &Bytes) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let text = std::str::from_utf8(bytes).ok()?;
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(mut json) => {
            redact_sensitive(&mut json);
            Some(serde_json::to_string_pretty(&json).unwrap_or_else(|_| text.to_string()))
        }
        Err(_) => Some(text.to_string()),
    }
}

pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !enabled!(Level::DEBUG) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    if bytes.len() <= MAX_LOGGED_BODY {
        if let Some(request_body) = render_body(&bytes) {
            debug!(
                method = %parts.method,
                uri = %parts.uri,
                request_body = %request_body,
                "Request"
            );
        }
    }

    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if bytes.len() <= MAX_LOGGED_BODY {
        if let Some(response_body) = render_body(&bytes) {
            debug!(status = %parts.status, response_body = %response_body, "Response");
        }
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

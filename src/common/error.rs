// Error handling types for the API

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

use super::validation::{ValidationError, ValidationResult};
use crate::auth::tokens::TokenError;
use crate::services::catalog::CatalogError;
use crate::services::credential_store::StoreError;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// Missing, malformed, expired or orphaned bearer token
    Unauthorized(String),
    /// Login failure. Unknown email and wrong password are indistinguishable.
    InvalidCredentials,
    /// Duplicate email or duplicate favorite
    Conflict(String),
    BadRequest(String),
    NotFound(String),
    InternalServer(String),
    /// The external movie catalog failed or could not be reached
    CatalogUnavailable(String),
    DatabaseError(sqlx::Error),
    ValidationError(Vec<ValidationError>),
    /// The request ran past the configured request timeout
    Timeout,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::InvalidCredentials => write!(f, "Invalid credentials"),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::CatalogUnavailable(msg) => write!(f, "Catalog Unavailable: {}", msg),
            ApiError::DatabaseError(e) => write!(f, "Database Error: {}", e),
            ApiError::Timeout => write!(f, "Request timed out"),
            ApiError::ValidationError(errors) => {
                let fields: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation Error: {}", fields.join(", "))
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}

/// JSON body for per-field validation failures
#[derive(Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<ValidationError>,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, code) = match self {
            ApiError::ValidationError(errors) => {
                let body = ValidationErrorResponse {
                    errors,
                    code: "VALIDATION_ERROR".to_string(),
                };
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, "UNAUTHORIZED"),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid credentials".to_string(),
                "INVALID_CREDENTIALS",
            ),
            // Duplicates are reported as 400, matching the existing client contract
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg, "CONFLICT"),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            ApiError::InternalServer(msg) => {
                error!(detail = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                    "INTERNAL_SERVER_ERROR",
                )
            }
            ApiError::CatalogUnavailable(msg) => {
                warn!(detail = %msg, "Movie catalog request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Movie catalog is temporarily unavailable".to_string(),
                    "CATALOG_UNAVAILABLE",
                )
            }
            ApiError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "Request timed out".to_string(),
                "REQUEST_TIMEOUT",
            ),
            ApiError::DatabaseError(e) => {
                error!(error = %e, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                    "DATABASE_ERROR",
                )
            }
        };

        let error_response = ErrorResponse {
            message,
            code: code.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<ValidationResult> for ApiError {
    fn from(result: ValidationResult) -> Self {
        if result.is_valid {
            ApiError::InternalServer(
                "Validation result was valid but converted to error".to_string(),
            )
        } else {
            ApiError::ValidationError(result.errors)
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::DatabaseError(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::EmailTaken => ApiError::Conflict("User already exists".to_string()),
            StoreError::AlreadyFavorite(_) => {
                ApiError::Conflict("Movie already in favorites".to_string())
            }
            StoreError::UserNotFound(id) => {
                ApiError::NotFound(format!("user {} not found", id))
            }
            StoreError::Hashing(msg) => ApiError::InternalServer(msg),
            StoreError::Database(e) => ApiError::DatabaseError(e),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(id) => ApiError::NotFound(format!("Movie {} not found", id)),
            other => ApiError::CatalogUnavailable(other.to_string()),
        }
    }
}

/// Field named by a serde deserialization error, e.g. `movieId` in
/// `"...target type: movieId: invalid type: string \"abc\", expected i64..."`
fn rejected_field(detail: &str) -> Option<&str> {
    let (field, _) = detail.split_once(": ")?;
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    valid.then_some(field)
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON that does not fit the request type: report the field
            JsonRejection::JsonDataError(e) => {
                let text = e.body_text();
                let detail = text
                    .split_once("target type: ")
                    .map_or(text.as_str(), |(_, rest)| rest);
                let mut result = ValidationResult::new();
                result.add_error(rejected_field(detail).unwrap_or("body"), detail);
                ApiError::ValidationError(result.errors)
            }
            other => {
                warn!(status = %other.status(), "Rejected request body");
                ApiError::BadRequest(other.body_text())
            }
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Invalid => ApiError::Unauthorized("invalid token".to_string()),
            TokenError::Encoding(msg) => ApiError::InternalServer(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let mut result = ValidationResult::new();
        result.add_error("email", "Please enter a valid email");
        result.add_error("password", "Password must be at least 6 characters");

        let (status, body) = body_json(ApiError::from(result)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
        assert_eq!(body["errors"][0]["field"], "email");
    }

    #[tokio::test]
    async fn test_invalid_credentials_shape() {
        let (status, body) = body_json(ApiError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_database_error_does_not_leak_details() {
        let (status, body) = body_json(ApiError::DatabaseError(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Server error");
    }

    #[tokio::test]
    async fn test_store_conflicts_map_to_stable_messages() {
        let (status, body) = body_json(StoreError::AlreadyFavorite(42).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Movie already in favorites");

        let (_, body) = body_json(StoreError::EmailTaken.into()).await;
        assert_eq!(body["message"], "User already exists");
    }

    #[test]
    fn test_rejected_field() {
        assert_eq!(
            rejected_field("movieId: invalid type: string \"abc\", expected i64 at line 1 column 16"),
            Some("movieId")
        );
        assert_eq!(rejected_field("invalid type: map, expected a sequence"), None);
        assert_eq!(rejected_field("no separator"), None);
    }

    #[tokio::test]
    async fn test_timeout_is_json() {
        let (status, body) = body_json(ApiError::Timeout).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body["code"], "REQUEST_TIMEOUT");
    }

    #[tokio::test]
    async fn test_catalog_failure_is_bad_gateway() {
        let err: ApiError = CatalogError::Api {
            status: 503,
            body: String::new(),
        }.into();
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "CATALOG_UNAVAILABLE");
    }
}

//! Authentication handlers

use axum::{
    extract::Extension,
    http::StatusCode,
    Json,
};
use tracing::{debug, info, warn};

use super::extractors::AuthedUser;
use super::models::{AuthResponse, CredentialsRequest, MeResponse};
use super::validators::{LoginValidator, RegisterValidator};
use crate::common::{safe_email_log, ApiError, ApiJson, SharedState, Validator};

/// POST /auth/register
/// Creates an account and returns a token for it
///
/// # Request Body
/// ```json
/// { "email": "a@x.com", "password": "secret1" }
/// ```
///
/// # Response (201)
/// ```json
/// { "id": "U_...", "email": "a@x.com", "token": "<jwt>" }
/// ```
pub async fn register(
    Extension(state_lock): Extension<SharedState>,
    ApiJson(payload): ApiJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let validation = RegisterValidator.validate(&payload);
    if !validation.is_valid {
        debug!(errors = validation.errors.len(), "Registration rejected by validation");
        return Err(validation.into());
    }

    let state = state_lock.read().await.clone();

    if state.store.find_by_email(&payload.email).await?.is_some() {
        warn!(
            email = %safe_email_log(&payload.email),
            "Registration rejected: email already registered"
        );
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let user = state
        .store
        .create_user(&payload.email, &payload.password)
        .await?;
    let token = state.tokens.issue(&user.id)?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        "User registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: user.id,
            email: user.email,
            token,
        }),
    ))
}

/// POST /auth/login
/// Exchanges email and password for a token
///
/// Unknown email and wrong password produce the same 401 body.
pub async fn login(
    Extension(state_lock): Extension<SharedState>,
    ApiJson(payload): ApiJson<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let validation = LoginValidator.validate(&payload);
    if !validation.is_valid {
        return Err(validation.into());
    }

    let state = state_lock.read().await.clone();

    let user = match state.store.find_by_email(&payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %safe_email_log(&payload.email), "Login failed");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !state.store.verify_password(&user, &payload.password).await? {
        warn!(email = %safe_email_log(&payload.email), "Login failed");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.tokens.issue(&user.id)?;
    info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        id: user.id,
        email: user.email,
        token,
    }))
}

/// GET /auth/me
/// Returns the authenticated user with a count of their favorites
pub async fn me_handler(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<MeResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let favorites = state.store.list_favorites(&authed.id).await?;

    Ok(Json(MeResponse {
        id: authed.id,
        email: authed.email,
        favorites_count: favorites.len(),
    }))
}

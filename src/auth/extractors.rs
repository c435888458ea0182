//! Authentication extractors for Axum
//!
//! The gate resolves a bearer token to an [`AuthedUser`] that handlers take as
//! an explicit argument. It is the only authorization check in the service.

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::{debug, warn};

use crate::common::{safe_email_log, safe_token_log, ApiError, AppState, SharedState};

/// Identity resolved by the auth gate
#[derive(Debug, Clone, PartialEq)]
pub struct AuthedUser {
    pub id: String,
    pub email: String,
}

/// Identity for routes that also serve anonymous callers
///
/// No `Authorization` header yields `None`. A header that is present but does
/// not resolve to a user is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeAuthedUser(pub Option<AuthedUser>);

/// Pull the token out of `Authorization`, accepting `Bearer <t>` or a raw token
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?.trim_start();
    // The scheme name is case-insensitive
    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => raw.trim(),
    };
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Verify `token` and load its subject from the credential store
pub async fn resolve_identity(state: &AppState, token: &str) -> Result<AuthedUser, ApiError> {
    let user_id = state.tokens.verify(token).map_err(|_| {
        warn!(token = %safe_token_log(token), "Authentication failed: invalid token");
        ApiError::Unauthorized("invalid token".into())
    })?;

    match state.store.find_by_id(&user_id).await? {
        Some(u) => {
            debug!(
                user_id = %u.id,
                email = %safe_email_log(&u.email),
                "User authentication successful via extractor"
            );
            Ok(AuthedUser {
                id: u.id,
                email: u.email,
            })
        }
        None => {
            warn!(user_id = %user_id, "Authentication failed: user not found");
            Err(ApiError::Unauthorized("user not found".into()))
        }
    }
}

async fn app_state<S: Send + Sync>(parts: &mut Parts, state: &S) -> Result<AppState, ApiError> {
    let Extension(state_lock): Extension<SharedState> =
        Extension::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;
    let app_state = state_lock.read().await.clone();
    Ok(app_state)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state).await?;

        let token = match bearer_token(&parts.headers) {
            Some(t) => t,
            None => {
                warn!("Authentication failed: missing Authorization header");
                return Err(ApiError::Unauthorized("missing auth".into()));
            }
        };

        resolve_identity(&app_state, &token).await
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(MaybeAuthedUser(None));
        };

        let app_state = app_state(parts, state).await?;
        resolve_identity(&app_state, &token)
            .await
            .map(|user| MaybeAuthedUser(Some(user)))
    }
}

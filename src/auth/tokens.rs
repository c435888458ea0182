//! Signed identity tokens (HS256 JWT)

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use super::models::Claims;

/// Lifetime of an issued token
pub const TOKEN_TTL_DAYS: i64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Bad signature, malformed or expired. The cause is only logged.
    #[error("invalid token")]
    Invalid,
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// Issues and verifies identity tokens with a secret supplied at construction
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is rejected the second after `exp`
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::days(TOKEN_TTL_DAYS),
        }
    }

    /// Issue a token for `subject_id` valid for 30 days from now
    pub fn issue(&self, subject_id: &str) -> Result<String, TokenError> {
        self.issue_at(subject_id, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`
    pub fn issue_at(&self, subject_id: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify a token and return the subject it was issued for
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|e| {
                debug!(error = %e, "Token verification failed");
                TokenError::Invalid
            })
    }
}

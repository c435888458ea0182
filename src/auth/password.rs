//! bcrypt password hashing
//!
//! bcrypt is CPU-bound, so both operations run on the blocking pool.

use tracing::error;

use crate::services::credential_store::StoreError;

pub async fn hash_password(password: &str, cost: u32) -> Result<String, StoreError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| StoreError::Hashing(format!("hash task failed: {}", e)))?
        .map_err(|e| {
            error!(error = %e, "Password hashing failed");
            StoreError::Hashing(e.to_string())
        })
}

/// Returns `Ok(false)` on mismatch. An unparseable stored hash is an error.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, StoreError> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| StoreError::Hashing(format!("verify task failed: {}", e)))?
        .map_err(|e| {
            error!(error = %e, "Stored password hash could not be verified");
            StoreError::Hashing(e.to_string())
        })
}

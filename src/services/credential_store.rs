// src/services/credential_store.rs
//! Persistence for user records and their favorites

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, error, info};

use crate::auth::models::User;
use crate::auth::password;
use crate::common::{generate_user_id, safe_email_log};
use crate::common::validation::normalize_email;
use crate::favorites::models::{Favorite, NewFavorite};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    EmailTaken,
    #[error("movie {0} already in favorites")]
    AlreadyFavorite(i64),
    #[error("user {0} not found")]
    UserNotFound(String),
    #[error("password hashing error: {0}")]
    Hashing(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage seam for users and favorites.
///
/// Emails are normalized by the store, so callers may pass them as typed.
/// Favorites are returned in insertion order.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Hashes `password` and persists a new user with no favorites
    async fn create_user(&self, email: &str, password: &str) -> Result<User, StoreError>;

    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, StoreError>;

    async fn list_favorites(&self, user_id: &str) -> Result<Vec<Favorite>, StoreError>;

    async fn is_favorite(&self, user_id: &str, movie_id: i64) -> Result<bool, StoreError>;

    /// Appends unless `movie_id` is already present; the check and the append
    /// are one conditional write. Returns the updated list.
    async fn add_favorite(
        &self,
        user_id: &str,
        favorite: &NewFavorite,
    ) -> Result<Vec<Favorite>, StoreError>;

    /// Removes every entry with `movie_id`. Missing entries are not an error.
    async fn remove_favorite(&self, user_id: &str, movie_id: i64)
        -> Result<Vec<Favorite>, StoreError>;
}

pub struct SqliteCredentialStore {
    pool: SqlitePool,
    bcrypt_cost: u32,
}

impl SqliteCredentialStore {
    pub fn new(pool: SqlitePool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }
}

const FAVORITE_COLUMNS: &str =
    "movie_id, title, poster_path, overview, release_date, vote_average, added_at";

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<User, StoreError> {
        let email = normalize_email(email);
        let password_hash = password::hash_password(password, self.bcrypt_cost).await?;
        let id = generate_user_id();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES (?, ?, ?)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(&id)
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                debug!(email = %safe_email_log(&email), "Insert raced with an existing user");
                StoreError::EmailTaken
            }
            other => {
                error!(error = %other, user_id = %id, "Database error inserting new user");
                StoreError::Database(other)
            }
        })?;

        info!(user_id = %user.id, email = %safe_email_log(&user.email), "User created");
        Ok(user)
    }

    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, StoreError> {
        password::verify_password(password, &user.password_hash).await
    }

    async fn list_favorites(&self, user_id: &str) -> Result<Vec<Favorite>, StoreError> {
        let favorites = sqlx::query_as::<_, Favorite>(&format!(
            "SELECT {} FROM favorites WHERE user_id = ? ORDER BY seq ASC",
            FAVORITE_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(favorites)
    }

    async fn is_favorite(&self, user_id: &str, movie_id: i64) -> Result<bool, StoreError> {
        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT seq FROM favorites WHERE user_id = ? AND movie_id = ?")
                .bind(user_id)
                .bind(movie_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(existing.is_some())
    }

    async fn add_favorite(
        &self,
        user_id: &str,
        favorite: &NewFavorite,
    ) -> Result<Vec<Favorite>, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO favorites
                (user_id, movie_id, title, poster_path, overview, release_date, vote_average)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (user_id, movie_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(favorite.movie_id)
        .bind(&favorite.title)
        .bind(favorite.poster_path.as_deref())
        .bind(&favorite.overview)
        .bind(&favorite.release_date)
        .bind(favorite.vote_average)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            // The user row vanished between the auth gate and this write
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                StoreError::UserNotFound(user_id.to_string())
            }
            other => StoreError::Database(other),
        })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyFavorite(favorite.movie_id));
        }

        self.list_favorites(user_id).await
    }

    async fn remove_favorite(
        &self,
        user_id: &str,
        movie_id: i64,
    ) -> Result<Vec<Favorite>, StoreError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND movie_id = ?")
            .bind(user_id)
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        debug!(
            user_id = %user_id,
            movie_id = movie_id,
            removed = result.rows_affected(),
            "Favorite removal applied"
        );

        self.list_favorites(user_id).await
    }
}

// src/services/mod.rs
//
// Services shared by the route modules: persistence and the movie catalog

pub mod catalog;
pub mod credential_store;

// Re-export commonly used types for convenience
pub use catalog::CatalogClient;
pub use credential_store::{CredentialStore, SqliteCredentialStore};

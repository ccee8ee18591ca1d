//! Database operations for the Barback `PostgreSQL` store.
//!
//! # Tables
//!
//! - `cocktail` - Cocktail base fields
//! - `ingredient` - Shared ingredient catalog (normalized, unique names)
//! - `recipe_step` - Ordered recipe steps owned by a cocktail
//! - `user_favorite` - Per-user cocktail bookmarks
//!
//! Repository functions are generic over [`sqlx::PgExecutor`], so the same
//! function runs against the pool for single reads and against an open
//! transaction when an operation spans multiple tables.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p barback-cli -- migrate
//! ```

pub mod cocktails;
pub mod favorites;
pub mod ingredients;
pub mod recipe_steps;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate favorite).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Escape `ILIKE` wildcard characters so a search term matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

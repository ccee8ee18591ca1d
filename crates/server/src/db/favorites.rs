//! Database operations for per-user favorites.

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;

use barback_core::{CocktailId, FavoriteId, SubjectId};

use super::RepositoryError;
use crate::models::Favorite;

/// Internal row type for favorite queries.
#[derive(Debug, sqlx::FromRow)]
struct FavoriteRow {
    id: i32,
    user_id: String,
    cocktail_id: i32,
    created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for Favorite {
    fn from(row: FavoriteRow) -> Self {
        Self {
            id: FavoriteId::new(row.id),
            user_id: SubjectId::new(row.user_id),
            cocktail_id: CocktailId::new(row.cocktail_id),
            created_at: row.created_at,
        }
    }
}

/// Insert a favorite for a (user, cocktail) pair.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the pair is already favorited.
/// Returns `RepositoryError::Database` for other database errors.
pub async fn insert(
    exec: impl PgExecutor<'_>,
    user_id: &SubjectId,
    cocktail_id: CocktailId,
) -> Result<Favorite, RepositoryError> {
    let row = sqlx::query_as::<_, FavoriteRow>(
        "INSERT INTO user_favorite (user_id, cocktail_id) VALUES ($1, $2) \
         RETURNING id, user_id, cocktail_id, created_at",
    )
    .bind(user_id.as_str())
    .bind(cocktail_id)
    .fetch_one(exec)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.constraint() == Some("user_favorite_unique")
        {
            return RepositoryError::Conflict("cocktail already favorited".to_string());
        }
        RepositoryError::Database(e)
    })?;

    Ok(row.into())
}

/// Find a favorite by its (user, cocktail) pair.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn find(
    exec: impl PgExecutor<'_>,
    user_id: &SubjectId,
    cocktail_id: CocktailId,
) -> Result<Option<Favorite>, RepositoryError> {
    let row = sqlx::query_as::<_, FavoriteRow>(
        "SELECT id, user_id, cocktail_id, created_at FROM user_favorite \
         WHERE user_id = $1 AND cocktail_id = $2",
    )
    .bind(user_id.as_str())
    .bind(cocktail_id)
    .fetch_optional(exec)
    .await?;

    Ok(row.map(Into::into))
}

/// Check whether a (user, cocktail) pair is favorited.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn exists(
    exec: impl PgExecutor<'_>,
    user_id: &SubjectId,
    cocktail_id: CocktailId,
) -> Result<bool, RepositoryError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM user_favorite WHERE user_id = $1 AND cocktail_id = $2)",
    )
    .bind(user_id.as_str())
    .bind(cocktail_id)
    .fetch_one(exec)
    .await?;

    Ok(exists)
}

/// Delete a favorite by its (user, cocktail) pair.
///
/// # Returns
///
/// Returns `true` if a favorite was deleted, `false` if none existed.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete(
    exec: impl PgExecutor<'_>,
    user_id: &SubjectId,
    cocktail_id: CocktailId,
) -> Result<bool, RepositoryError> {
    let result = sqlx::query("DELETE FROM user_favorite WHERE user_id = $1 AND cocktail_id = $2")
        .bind(user_id.as_str())
        .bind(cocktail_id)
        .execute(exec)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove every favorite referencing a cocktail, across all users.
///
/// # Returns
///
/// The number of favorites removed.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete_for_cocktail(
    exec: impl PgExecutor<'_>,
    cocktail_id: CocktailId,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query("DELETE FROM user_favorite WHERE cocktail_id = $1")
        .bind(cocktail_id)
        .execute(exec)
        .await?;

    Ok(result.rows_affected())
}

/// List a user's favorites, oldest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_for_user(
    exec: impl PgExecutor<'_>,
    user_id: &SubjectId,
) -> Result<Vec<Favorite>, RepositoryError> {
    let rows = sqlx::query_as::<_, FavoriteRow>(
        "SELECT id, user_id, cocktail_id, created_at FROM user_favorite \
         WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
    )
    .bind(user_id.as_str())
    .fetch_all(exec)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Count a user's favorites.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn count_for_user(
    exec: impl PgExecutor<'_>,
    user_id: &SubjectId,
) -> Result<i64, RepositoryError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_favorite WHERE user_id = $1")
        .bind(user_id.as_str())
        .fetch_one(exec)
        .await?;

    Ok(total)
}

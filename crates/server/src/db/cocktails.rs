//! Database operations for cocktail records.

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;

use barback_core::CocktailId;

use super::{RepositoryError, escape_like};
use crate::models::{Cocktail, NewCocktail};

/// Internal row type for cocktail queries.
#[derive(Debug, sqlx::FromRow)]
struct CocktailRow {
    id: i32,
    name: String,
    description: Option<String>,
    prep_time_minutes: Option<i32>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CocktailRow> for Cocktail {
    fn from(row: CocktailRow) -> Self {
        Self {
            id: CocktailId::new(row.id),
            name: row.name,
            description: row.description,
            prep_time_minutes: row.prep_time_minutes,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COCKTAIL_COLUMNS: &str = "id, name, description, prep_time_minutes, notes, created_at, updated_at";

/// Insert a new cocktail and return it with its assigned ID.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn insert(
    exec: impl PgExecutor<'_>,
    input: &NewCocktail,
) -> Result<Cocktail, RepositoryError> {
    let row = sqlx::query_as::<_, CocktailRow>(
        "INSERT INTO cocktail (name, description, prep_time_minutes, notes) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, name, description, prep_time_minutes, notes, created_at, updated_at",
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.prep_time_minutes)
    .bind(&input.notes)
    .fetch_one(exec)
    .await?;

    Ok(row.into())
}

/// Get a cocktail by ID.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn find_by_id(
    exec: impl PgExecutor<'_>,
    id: CocktailId,
) -> Result<Option<Cocktail>, RepositoryError> {
    let row = sqlx::query_as::<_, CocktailRow>(&format!(
        "SELECT {COCKTAIL_COLUMNS} FROM cocktail WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(exec)
    .await?;

    Ok(row.map(Into::into))
}

/// Check whether a cocktail exists.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn exists(exec: impl PgExecutor<'_>, id: CocktailId) -> Result<bool, RepositoryError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM cocktail WHERE id = $1)")
        .bind(id)
        .fetch_one(exec)
        .await?;

    Ok(exists)
}

/// Overwrite a cocktail's base fields.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the cocktail doesn't exist.
/// Returns `RepositoryError::Database` for other database errors.
pub async fn update(
    exec: impl PgExecutor<'_>,
    cocktail: &Cocktail,
) -> Result<Cocktail, RepositoryError> {
    let row = sqlx::query_as::<_, CocktailRow>(
        "UPDATE cocktail \
         SET name = $2, description = $3, prep_time_minutes = $4, notes = $5, updated_at = now() \
         WHERE id = $1 \
         RETURNING id, name, description, prep_time_minutes, notes, created_at, updated_at",
    )
    .bind(cocktail.id)
    .bind(&cocktail.name)
    .bind(&cocktail.description)
    .bind(cocktail.prep_time_minutes)
    .bind(&cocktail.notes)
    .fetch_optional(exec)
    .await?
    .ok_or(RepositoryError::NotFound)?;

    Ok(row.into())
}

/// Delete a cocktail record.
///
/// Callers must remove favorites and recipe steps first; the foreign keys
/// are RESTRICT.
///
/// # Returns
///
/// Returns `true` if the cocktail was deleted, `false` if it didn't exist.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete(exec: impl PgExecutor<'_>, id: CocktailId) -> Result<bool, RepositoryError> {
    let result = sqlx::query("DELETE FROM cocktail WHERE id = $1")
        .bind(id)
        .execute(exec)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// List cocktails ordered by name.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list(
    exec: impl PgExecutor<'_>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Cocktail>, RepositoryError> {
    let rows = sqlx::query_as::<_, CocktailRow>(&format!(
        "SELECT {COCKTAIL_COLUMNS} FROM cocktail ORDER BY name ASC, id ASC LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(exec)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Count all cocktails.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn count(exec: impl PgExecutor<'_>) -> Result<i64, RepositoryError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cocktail")
        .fetch_one(exec)
        .await?;

    Ok(total)
}

/// List cocktails whose name contains the term (case-insensitive).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn search(
    exec: impl PgExecutor<'_>,
    term: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Cocktail>, RepositoryError> {
    let rows = sqlx::query_as::<_, CocktailRow>(&format!(
        "SELECT {COCKTAIL_COLUMNS} FROM cocktail \
         WHERE name ILIKE '%' || $1 || '%' \
         ORDER BY name ASC, id ASC LIMIT $2 OFFSET $3"
    ))
    .bind(escape_like(term))
    .bind(limit)
    .bind(offset)
    .fetch_all(exec)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Count cocktails whose name contains the term (case-insensitive).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn search_count(exec: impl PgExecutor<'_>, term: &str) -> Result<i64, RepositoryError> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM cocktail WHERE name ILIKE '%' || $1 || '%'",
    )
    .bind(escape_like(term))
    .fetch_one(exec)
    .await?;

    Ok(total)
}

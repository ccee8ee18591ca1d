//! Database operations for the shared ingredient catalog.
//!
//! Ingredient names are stored normalized (trimmed, lowercased); callers are
//! expected to normalize before passing names in.

use std::collections::HashMap;

use sqlx::PgExecutor;

use barback_core::IngredientId;

use super::{RepositoryError, escape_like};
use crate::models::Ingredient;

/// Internal row type for ingredient queries.
#[derive(Debug, sqlx::FromRow)]
struct IngredientRow {
    id: i32,
    name: String,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: IngredientId::new(row.id),
            name: row.name,
        }
    }
}

/// Get or create an ingredient by its normalized name, atomically.
///
/// The no-op `DO UPDATE` makes `RETURNING` yield the existing row on
/// conflict, so concurrent callers with the same name never fail and at most
/// one record is ever created per name.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn upsert_by_name(
    exec: impl PgExecutor<'_>,
    name: &str,
) -> Result<Ingredient, RepositoryError> {
    let row = sqlx::query_as::<_, IngredientRow>(
        "INSERT INTO ingredient (name) VALUES ($1) \
         ON CONFLICT ON CONSTRAINT ingredient_name_unique \
         DO UPDATE SET name = EXCLUDED.name \
         RETURNING id, name",
    )
    .bind(name)
    .fetch_one(exec)
    .await?;

    Ok(row.into())
}

/// Get an ingredient by ID.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn find_by_id(
    exec: impl PgExecutor<'_>,
    id: IngredientId,
) -> Result<Option<Ingredient>, RepositoryError> {
    let row = sqlx::query_as::<_, IngredientRow>("SELECT id, name FROM ingredient WHERE id = $1")
        .bind(id)
        .fetch_optional(exec)
        .await?;

    Ok(row.map(Into::into))
}

/// Fetch display names for a set of ingredient IDs in one query.
///
/// IDs with no matching record are simply absent from the map.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn names_by_ids(
    exec: impl PgExecutor<'_>,
    ids: &[IngredientId],
) -> Result<HashMap<IngredientId, String>, RepositoryError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let raw_ids: Vec<i32> = ids.iter().map(|id| id.as_i32()).collect();
    let rows = sqlx::query_as::<_, IngredientRow>(
        "SELECT id, name FROM ingredient WHERE id = ANY($1)",
    )
    .bind(&raw_ids)
    .fetch_all(exec)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| (IngredientId::new(row.id), row.name))
        .collect())
}

/// Delete an ingredient record.
///
/// Callers must detach referencing recipe steps first; the foreign key is
/// RESTRICT.
///
/// # Returns
///
/// Returns `true` if the ingredient was deleted, `false` if it didn't exist.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete(exec: impl PgExecutor<'_>, id: IngredientId) -> Result<bool, RepositoryError> {
    let result = sqlx::query("DELETE FROM ingredient WHERE id = $1")
        .bind(id)
        .execute(exec)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// List ingredients ordered by name.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list(
    exec: impl PgExecutor<'_>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Ingredient>, RepositoryError> {
    let rows = sqlx::query_as::<_, IngredientRow>(
        "SELECT id, name FROM ingredient ORDER BY name ASC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(exec)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Count all ingredients.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn count(exec: impl PgExecutor<'_>) -> Result<i64, RepositoryError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ingredient")
        .fetch_one(exec)
        .await?;

    Ok(total)
}

/// List ingredients whose name contains the term (case-insensitive).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn search(
    exec: impl PgExecutor<'_>,
    term: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Ingredient>, RepositoryError> {
    let rows = sqlx::query_as::<_, IngredientRow>(
        "SELECT id, name FROM ingredient \
         WHERE name ILIKE '%' || $1 || '%' \
         ORDER BY name ASC LIMIT $2 OFFSET $3",
    )
    .bind(escape_like(term))
    .bind(limit)
    .bind(offset)
    .fetch_all(exec)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Count ingredients whose name contains the term (case-insensitive).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn search_count(exec: impl PgExecutor<'_>, term: &str) -> Result<i64, RepositoryError> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM ingredient WHERE name ILIKE '%' || $1 || '%'",
    )
    .bind(escape_like(term))
    .fetch_one(exec)
    .await?;

    Ok(total)
}

//! Ingredient catalog: the shared set of distinct ingredient names.

use sqlx::{PgConnection, PgPool};

use barback_core::IngredientId;

use super::ServiceError;
use crate::db::{self, RepositoryError};
use crate::models::{Ingredient, Page, PageParams};

/// Normalize an ingredient name for comparison or storage: trim whitespace
/// and lowercase.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Resolve a raw ingredient name to an existing or newly created catalog
/// record, inside the caller's transaction.
///
/// Pure get-or-create: concurrent calls for the same name never fail and
/// create at most one record.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn resolve(
    conn: &mut PgConnection,
    raw_name: &str,
) -> Result<Ingredient, RepositoryError> {
    db::ingredients::upsert_by_name(&mut *conn, &normalize(raw_name)).await
}

/// Service for browsing and maintaining the shared ingredient catalog.
#[derive(Debug, Clone)]
pub struct IngredientCatalog {
    pool: PgPool,
}

impl IngredientCatalog {
    /// Create a new catalog service over a pool handle.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve a raw name to an existing or newly created ingredient.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn resolve(&self, raw_name: &str) -> Result<Ingredient, ServiceError> {
        let ingredient = db::ingredients::upsert_by_name(&self.pool, &normalize(raw_name)).await?;
        Ok(ingredient)
    }

    /// List ingredients, optionally filtered by a case-insensitive substring.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn list(
        &self,
        term: Option<&str>,
        params: PageParams,
    ) -> Result<Page<Ingredient>, ServiceError> {
        let (items, total) = match term {
            Some(term) => (
                db::ingredients::search(&self.pool, term, params.limit(), params.offset()).await?,
                db::ingredients::search_count(&self.pool, term).await?,
            ),
            None => (
                db::ingredients::list(&self.pool, params.limit(), params.offset()).await?,
                db::ingredients::count(&self.pool).await?,
            ),
        };

        Ok(Page::new(items, params, total))
    }

    /// Delete an ingredient, first detaching every recipe step that references
    /// it, in one transaction.
    ///
    /// This can shrink an existing cocktail's recipe below the creation-time
    /// minimum; unrelated cocktails are not re-validated.
    ///
    /// # Returns
    ///
    /// Returns `true` if the ingredient was deleted, `false` if it didn't
    /// exist. The result comes from the DELETE's row count, not the pre-check,
    /// so of two racing calls exactly one returns `true`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn delete(&self, id: IngredientId) -> Result<bool, ServiceError> {
        let mut tx = self.pool.begin().await?;

        if db::ingredients::find_by_id(&mut *tx, id).await?.is_none() {
            return Ok(false);
        }

        let detached = db::recipe_steps::delete_for_ingredient(&mut *tx, id).await?;
        let deleted = db::ingredients::delete(&mut *tx, id).await?;

        tx.commit().await?;
        if deleted {
            tracing::info!(ingredient_id = %id, steps_detached = detached, "deleted ingredient");
        }
        Ok(deleted)
    }
}

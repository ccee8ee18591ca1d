//! Database operations for recipe steps.

use rust_decimal::Decimal;
use sqlx::PgExecutor;

use barback_core::{CocktailId, IngredientId, RecipeStepId};

use super::RepositoryError;
use crate::models::{NewRecipeStep, RecipeStep};

/// Internal row type for recipe step queries.
#[derive(Debug, sqlx::FromRow)]
struct RecipeStepRow {
    id: i32,
    cocktail_id: i32,
    ingredient_id: i32,
    quantity: Option<Decimal>,
    unit: Option<String>,
    step_order: i32,
    instruction: String,
}

impl From<RecipeStepRow> for RecipeStep {
    fn from(row: RecipeStepRow) -> Self {
        Self {
            id: RecipeStepId::new(row.id),
            cocktail_id: CocktailId::new(row.cocktail_id),
            ingredient_id: IngredientId::new(row.ingredient_id),
            quantity: row.quantity,
            unit: row.unit,
            step_order: row.step_order,
            instruction: row.instruction,
        }
    }
}

/// Insert a recipe step.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn insert(
    exec: impl PgExecutor<'_>,
    input: &NewRecipeStep,
) -> Result<RecipeStep, RepositoryError> {
    let row = sqlx::query_as::<_, RecipeStepRow>(
        "INSERT INTO recipe_step (cocktail_id, ingredient_id, quantity, unit, step_order, instruction) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id, cocktail_id, ingredient_id, quantity, unit, step_order, instruction",
    )
    .bind(input.cocktail_id)
    .bind(input.ingredient_id)
    .bind(input.quantity)
    .bind(&input.unit)
    .bind(input.step_order)
    .bind(&input.instruction)
    .fetch_one(exec)
    .await?;

    Ok(row.into())
}

/// List a cocktail's steps ordered by step order.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_for_cocktail(
    exec: impl PgExecutor<'_>,
    cocktail_id: CocktailId,
) -> Result<Vec<RecipeStep>, RepositoryError> {
    let rows = sqlx::query_as::<_, RecipeStepRow>(
        "SELECT id, cocktail_id, ingredient_id, quantity, unit, step_order, instruction \
         FROM recipe_step WHERE cocktail_id = $1 ORDER BY step_order ASC",
    )
    .bind(cocktail_id)
    .fetch_all(exec)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Remove every step owned by a cocktail.
///
/// # Returns
///
/// The number of steps removed.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete_for_cocktail(
    exec: impl PgExecutor<'_>,
    cocktail_id: CocktailId,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query("DELETE FROM recipe_step WHERE cocktail_id = $1")
        .bind(cocktail_id)
        .execute(exec)
        .await?;

    Ok(result.rows_affected())
}

/// Remove every step referencing an ingredient, across all cocktails.
///
/// # Returns
///
/// The number of steps removed.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete_for_ingredient(
    exec: impl PgExecutor<'_>,
    ingredient_id: IngredientId,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query("DELETE FROM recipe_step WHERE ingredient_id = $1")
        .bind(ingredient_id)
        .execute(exec)
        .await?;

    Ok(result.rows_affected())
}

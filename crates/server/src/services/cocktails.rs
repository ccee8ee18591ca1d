//! Cocktail aggregate manager: transactional creation, partial update, and
//! cascading deletion of a cocktail together with its recipe steps and any
//! favorite references.

use std::collections::HashSet;

use sqlx::PgPool;

use barback_core::CocktailId;

use super::{ServiceError, UNKNOWN_INGREDIENT, ValidationError, assembler, catalog};
use crate::db;
use crate::models::{
    Cocktail, CocktailView, CreateCocktailRequest, NewRecipeStep, Page, PageParams, RecipeStepView,
    UpdateCocktailRequest,
};

/// Service orchestrating the cocktail aggregate lifecycle.
#[derive(Debug, Clone)]
pub struct CocktailService {
    pool: PgPool,
}

impl CocktailService {
    /// Create a new cocktail service over a pool handle.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a cocktail with its recipe in one transaction.
    ///
    /// The assembler validates the request and drafts the steps; the cocktail
    /// is persisted first to obtain its identity, then each step in assembled
    /// order, resolving ingredients through the catalog as it goes (creating
    /// any that don't exist yet).
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for caller-correctable failures
    /// (empty name, too few ingredients, in-request duplicate ingredient) and
    /// `ServiceError::Repository` if the store fails.
    pub async fn create(&self, request: &CreateCocktailRequest) -> Result<CocktailView, ServiceError> {
        let draft = assembler::assemble(request)?;

        let mut tx = self.pool.begin().await?;

        let cocktail = db::cocktails::insert(&mut *tx, &draft.cocktail).await?;

        let mut steps = Vec::with_capacity(draft.steps.len());
        for step in &draft.steps {
            let ingredient = catalog::resolve(&mut *tx, &step.ingredient_name).await?;
            let persisted = db::recipe_steps::insert(
                &mut *tx,
                &NewRecipeStep {
                    cocktail_id: cocktail.id,
                    ingredient_id: ingredient.id,
                    quantity: step.quantity,
                    unit: step.unit.clone(),
                    step_order: step.step_order,
                    instruction: step.instruction.clone(),
                },
            )
            .await?;

            steps.push(RecipeStepView {
                step_order: persisted.step_order,
                ingredient: ingredient.name,
                quantity: persisted.quantity,
                unit: persisted.unit,
                instruction: persisted.instruction,
            });
        }

        tx.commit().await?;
        tracing::info!(cocktail_id = %cocktail.id, steps = steps.len(), "created cocktail");

        Ok(into_view(cocktail, steps))
    }

    /// Get a hydrated cocktail by ID.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn get(&self, id: CocktailId) -> Result<Option<CocktailView>, ServiceError> {
        match db::cocktails::find_by_id(&self.pool, id).await? {
            Some(cocktail) => Ok(Some(self.hydrate(cocktail).await?)),
            None => Ok(None),
        }
    }

    /// List cocktails, hydrated, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn list(&self, params: PageParams) -> Result<Page<CocktailView>, ServiceError> {
        let cocktails = db::cocktails::list(&self.pool, params.limit(), params.offset()).await?;
        let total = db::cocktails::count(&self.pool).await?;
        let items = self.hydrate_all(cocktails).await?;
        Ok(Page::new(items, params, total))
    }

    /// List cocktails whose name contains the term (case-insensitive), hydrated.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn search(
        &self,
        term: &str,
        params: PageParams,
    ) -> Result<Page<CocktailView>, ServiceError> {
        let cocktails =
            db::cocktails::search(&self.pool, term, params.limit(), params.offset()).await?;
        let total = db::cocktails::search_count(&self.pool, term).await?;
        let items = self.hydrate_all(cocktails).await?;
        Ok(Page::new(items, params, total))
    }

    /// Partially update a cocktail's base fields in one transaction.
    ///
    /// Load-merge-store: omitted fields stay untouched, explicit null (or a
    /// blank string for the text fields) clears, a value overwrites. The
    /// recipe is not touched - there is no edit-ingredients operation.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the cocktail doesn't exist,
    /// `ServiceError::Validation` if the update would blank the name, and
    /// `ServiceError::Repository` if the store fails.
    pub async fn update(
        &self,
        id: CocktailId,
        request: &UpdateCocktailRequest,
    ) -> Result<CocktailView, ServiceError> {
        let mut tx = self.pool.begin().await?;

        let mut cocktail = db::cocktails::find_by_id(&mut *tx, id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        apply_update(&mut cocktail, request)?;
        let updated = db::cocktails::update(&mut *tx, &cocktail).await?;

        tx.commit().await?;

        self.hydrate(updated).await
    }

    /// Delete a cocktail and everything that references it, in one
    /// transaction: favorites first, then recipe steps, then the cocktail
    /// record itself. Shared ingredients are never deleted.
    ///
    /// # Returns
    ///
    /// Returns `true` if the cocktail was deleted, `false` if it didn't exist.
    /// The result comes from the final DELETE's row count, not the existence
    /// pre-check: a concurrent delete that wins the race leaves this DELETE
    /// affecting zero rows, so of two racing calls exactly one returns `true`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn delete(&self, id: CocktailId) -> Result<bool, ServiceError> {
        let mut tx = self.pool.begin().await?;

        if !db::cocktails::exists(&mut *tx, id).await? {
            return Ok(false);
        }

        let favorites_removed = db::favorites::delete_for_cocktail(&mut *tx, id).await?;
        let steps_removed = db::recipe_steps::delete_for_cocktail(&mut *tx, id).await?;
        let deleted = db::cocktails::delete(&mut *tx, id).await?;

        tx.commit().await?;
        if deleted {
            tracing::info!(
                cocktail_id = %id,
                favorites_removed,
                steps_removed,
                "deleted cocktail"
            );
        }
        Ok(deleted)
    }

    /// Hydrate a cocktail: load its steps in order and annotate each with the
    /// ingredient's display name, fetching each distinct ingredient at most
    /// once. A missing ingredient record (possible only after an explicit
    /// ingredient delete raced the step load) falls back to
    /// [`UNKNOWN_INGREDIENT`].
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn hydrate(&self, cocktail: Cocktail) -> Result<CocktailView, ServiceError> {
        let steps = db::recipe_steps::list_for_cocktail(&self.pool, cocktail.id).await?;

        let mut distinct_ids = Vec::new();
        let mut seen = HashSet::new();
        for step in &steps {
            if seen.insert(step.ingredient_id) {
                distinct_ids.push(step.ingredient_id);
            }
        }
        let names = db::ingredients::names_by_ids(&self.pool, &distinct_ids).await?;

        let step_views = steps
            .into_iter()
            .map(|step| RecipeStepView {
                step_order: step.step_order,
                ingredient: names
                    .get(&step.ingredient_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_INGREDIENT.to_string()),
                quantity: step.quantity,
                unit: step.unit,
                instruction: step.instruction,
            })
            .collect();

        Ok(into_view(cocktail, step_views))
    }

    async fn hydrate_all(
        &self,
        cocktails: Vec<Cocktail>,
    ) -> Result<Vec<CocktailView>, ServiceError> {
        let mut views = Vec::with_capacity(cocktails.len());
        for cocktail in cocktails {
            views.push(self.hydrate(cocktail).await?);
        }
        Ok(views)
    }
}

fn into_view(cocktail: Cocktail, steps: Vec<RecipeStepView>) -> CocktailView {
    CocktailView {
        id: cocktail.id,
        name: cocktail.name,
        description: cocktail.description,
        prep_time_minutes: cocktail.prep_time_minutes,
        notes: cocktail.notes,
        steps,
    }
}

/// Merge a partial-update request into a loaded cocktail.
///
/// # Errors
///
/// Returns `ValidationError::EmptyName` if the request explicitly nulls or
/// blanks the name.
fn apply_update(
    cocktail: &mut Cocktail,
    request: &UpdateCocktailRequest,
) -> Result<(), ValidationError> {
    if let Some(name) = &request.name {
        match name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(trimmed) => cocktail.name = trimmed.to_string(),
            None => return Err(ValidationError::EmptyName),
        }
    }
    if let Some(description) = &request.description {
        cocktail.description = clean_text(description.as_deref());
    }
    if let Some(prep_time_minutes) = request.prep_time_minutes {
        cocktail.prep_time_minutes = prep_time_minutes;
    }
    if let Some(notes) = &request.notes {
        cocktail.notes = clean_text(notes.as_deref());
    }
    Ok(())
}

/// Blank or null text clears the field; anything else is stored trimmed.
fn clean_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn cocktail() -> Cocktail {
        Cocktail {
            id: CocktailId::new(1),
            name: "Margarita".to_string(),
            description: Some("Classic sour".to_string()),
            prep_time_minutes: Some(5),
            notes: Some("salt rim".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_omitted_fields_untouched() {
        let mut c = cocktail();
        let req = UpdateCocktailRequest {
            description: Some(Some("new description".to_string())),
            ..Default::default()
        };
        apply_update(&mut c, &req).expect("valid update");
        assert_eq!(c.description.as_deref(), Some("new description"));
        assert_eq!(c.name, "Margarita");
        assert_eq!(c.prep_time_minutes, Some(5));
        assert_eq!(c.notes.as_deref(), Some("salt rim"));
    }

    #[test]
    fn test_explicit_null_clears_optional_field() {
        let mut c = cocktail();
        let req = UpdateCocktailRequest {
            notes: Some(None),
            ..Default::default()
        };
        apply_update(&mut c, &req).expect("valid update");
        assert_eq!(c.notes, None);
    }

    #[test]
    fn test_blank_description_clears_it() {
        let mut c = cocktail();
        let req = UpdateCocktailRequest {
            description: Some(Some("   ".to_string())),
            ..Default::default()
        };
        apply_update(&mut c, &req).expect("valid update");
        assert_eq!(c.description, None);
    }

    #[test]
    fn test_null_prep_time_clears_it() {
        let mut c = cocktail();
        let req = UpdateCocktailRequest {
            prep_time_minutes: Some(None),
            ..Default::default()
        };
        apply_update(&mut c, &req).expect("valid update");
        assert_eq!(c.prep_time_minutes, None);
    }

    #[test]
    fn test_name_cannot_be_cleared() {
        let mut c = cocktail();
        let req = UpdateCocktailRequest {
            name: Some(None),
            ..Default::default()
        };
        assert_eq!(apply_update(&mut c, &req), Err(ValidationError::EmptyName));

        let req = UpdateCocktailRequest {
            name: Some(Some("  ".to_string())),
            ..Default::default()
        };
        assert_eq!(apply_update(&mut c, &req), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_name_overwrite_trimmed() {
        let mut c = cocktail();
        let req = UpdateCocktailRequest {
            name: Some(Some("  Tommy's Margarita ".to_string())),
            ..Default::default()
        };
        apply_update(&mut c, &req).expect("valid update");
        assert_eq!(c.name, "Tommy's Margarita");
    }
}

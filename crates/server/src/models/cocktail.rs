//! Cocktail aggregate domain models: the cocktail record, its ordered recipe
//! steps, and the request/response shapes for the cocktail API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use barback_core::{CocktailId, IngredientId, RecipeStepId};

use super::double_option;

/// A cocktail record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cocktail {
    /// Unique cocktail ID.
    pub id: CocktailId,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional preparation time in minutes.
    pub prep_time_minutes: Option<i32>,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// When the cocktail was created.
    pub created_at: DateTime<Utc>,
    /// When the cocktail was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A recipe step: one ingredient with quantity, unit, and position within the
/// owning cocktail's ordered sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeStep {
    /// Unique step ID.
    pub id: RecipeStepId,
    /// Owning cocktail.
    pub cocktail_id: CocktailId,
    /// Referenced shared ingredient.
    pub ingredient_id: IngredientId,
    /// Optional quantity.
    pub quantity: Option<Decimal>,
    /// Optional measurement unit (e.g., "oz").
    pub unit: Option<String>,
    /// 1-based position within the cocktail's sequence.
    pub step_order: i32,
    /// Instruction text.
    pub instruction: String,
}

/// Input for inserting a cocktail (before it has an ID).
#[derive(Debug, Clone)]
pub struct NewCocktail {
    pub name: String,
    pub description: Option<String>,
    pub prep_time_minutes: Option<i32>,
    pub notes: Option<String>,
}

/// Input for inserting a recipe step.
#[derive(Debug, Clone)]
pub struct NewRecipeStep {
    pub cocktail_id: CocktailId,
    pub ingredient_id: IngredientId,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub step_order: i32,
    pub instruction: String,
}

/// One ingredient entry in a cocktail creation request.
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientEntry {
    /// Raw ingredient name; normalized (trimmed, lowercased) before resolution.
    pub name: String,
    /// Optional quantity, copied verbatim onto the step.
    pub quantity: Option<Decimal>,
    /// Optional unit, copied verbatim onto the step.
    pub unit: Option<String>,
}

/// Request body for creating a cocktail with its recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCocktailRequest {
    pub name: String,
    pub description: Option<String>,
    pub prep_time_minutes: Option<i32>,
    pub notes: Option<String>,
    /// Flat ingredient list; input order determines step order.
    pub ingredients: Vec<IngredientEntry>,
    /// Shared instruction applied to every step; a fixed placeholder is used
    /// when absent or blank.
    pub instruction: Option<String>,
}

/// Request body for partially updating a cocktail's base fields.
///
/// Three-state semantics per field: omitted means "leave unchanged", explicit
/// `null` (or a blank string for the text fields) means "clear", a value means
/// "overwrite". The recipe itself is not updatable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCocktailRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub prep_time_minutes: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

impl UpdateCocktailRequest {
    /// True when no field was supplied at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.prep_time_minutes.is_none()
            && self.notes.is_none()
    }
}

/// A hydrated view of a cocktail: base fields plus its ordered steps, each
/// carrying the resolved ingredient's display name.
#[derive(Debug, Clone, Serialize)]
pub struct CocktailView {
    pub id: CocktailId,
    pub name: String,
    pub description: Option<String>,
    pub prep_time_minutes: Option<i32>,
    pub notes: Option<String>,
    pub steps: Vec<RecipeStepView>,
}

/// One step in a hydrated cocktail view.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeStepView {
    pub step_order: i32,
    /// Resolved ingredient display name.
    pub ingredient: String,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub instruction: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_absent_from_null() {
        let req: UpdateCocktailRequest =
            serde_json::from_str(r#"{"description": null}"#).expect("deserialize");
        assert!(req.name.is_none());
        assert_eq!(req.description, Some(None));
        assert!(req.prep_time_minutes.is_none());
    }

    #[test]
    fn test_update_request_value() {
        let req: UpdateCocktailRequest =
            serde_json::from_str(r#"{"prep_time_minutes": 5, "notes": "strong"}"#)
                .expect("deserialize");
        assert_eq!(req.prep_time_minutes, Some(Some(5)));
        assert_eq!(req.notes, Some(Some("strong".to_string())));
        assert!(req.name.is_none());
    }

    #[test]
    fn test_update_request_empty_body() {
        let req: UpdateCocktailRequest = serde_json::from_str("{}").expect("deserialize");
        assert!(req.is_empty());
    }

    #[test]
    fn test_create_request_deserializes_decimal_quantity() {
        let req: CreateCocktailRequest = serde_json::from_str(
            r#"{
                "name": "Margarita",
                "ingredients": [
                    {"name": "tequila", "quantity": "2", "unit": "oz"},
                    {"name": "lime juice", "quantity": "0.5", "unit": "oz"}
                ]
            }"#,
        )
        .expect("deserialize");
        assert_eq!(req.ingredients.len(), 2);
        assert_eq!(req.ingredients[1].quantity, Some(Decimal::new(5, 1)));
        assert!(req.instruction.is_none());
    }
}

//! Shared ingredient catalog model.

use serde::{Deserialize, Serialize};

use barback_core::IngredientId;

/// A catalog ingredient.
///
/// Names are stored normalized (trimmed, lowercased) and are unique across
/// the catalog. Ingredients are shared between recipes and outlive any single
/// cocktail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique ingredient ID.
    pub id: IngredientId,
    /// Normalized ingredient name.
    pub name: String,
}

//! Recipe assembler: turns a flat ingredient list into an ordered, validated
//! recipe draft.
//!
//! Assembly is pure - nothing here touches the store. The draft's ingredient
//! names are already normalized; resolution against the catalog happens when
//! the aggregate manager persists the draft inside its transaction.

use std::collections::HashSet;

use rust_decimal::Decimal;

use super::{DEFAULT_INSTRUCTION, MIN_INGREDIENTS, ValidationError, catalog};
use crate::models::{CreateCocktailRequest, NewCocktail};

/// A validated cocktail plus its ordered step drafts, not yet persisted.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub cocktail: NewCocktail,
    pub steps: Vec<StepDraft>,
}

/// One drafted recipe step; `ingredient_name` is normalized.
#[derive(Debug, Clone)]
pub struct StepDraft {
    pub ingredient_name: String,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub step_order: i32,
    pub instruction: String,
}

/// Validate a creation request and draft its recipe steps.
///
/// Preconditions, checked in order:
/// 1. the name must be non-empty after trimming,
/// 2. at least [`MIN_INGREDIENTS`] ingredient entries,
/// 3. no two entries may normalize to the same ingredient name. A name that
///    collides with an existing, unrelated catalog ingredient is fine - only
///    repetition within the request is rejected.
///
/// Step order equals each entry's 1-based position in the input sequence;
/// entries are never reordered or deduplicated beyond the check above.
/// Quantity and unit are copied verbatim. Every step carries the trimmed
/// shared instruction, or [`DEFAULT_INSTRUCTION`] when none was supplied.
///
/// # Errors
///
/// Returns the first failing [`ValidationError`].
pub fn assemble(request: &CreateCocktailRequest) -> Result<RecipeDraft, ValidationError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if request.ingredients.len() < MIN_INGREDIENTS {
        return Err(ValidationError::InsufficientIngredients);
    }

    let instruction = request
        .instruction
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_INSTRUCTION)
        .to_string();

    let mut seen = HashSet::with_capacity(request.ingredients.len());
    let mut steps = Vec::with_capacity(request.ingredients.len());
    for (index, entry) in request.ingredients.iter().enumerate() {
        let normalized = catalog::normalize(&entry.name);
        if !seen.insert(normalized.clone()) {
            return Err(ValidationError::DuplicateIngredient(
                entry.name.trim().to_string(),
            ));
        }

        steps.push(StepDraft {
            ingredient_name: normalized,
            quantity: entry.quantity,
            unit: entry.unit.clone(),
            step_order: (index + 1).try_into().unwrap_or(i32::MAX),
            instruction: instruction.clone(),
        });
    }

    Ok(RecipeDraft {
        cocktail: NewCocktail {
            name: name.to_string(),
            description: request.description.clone(),
            prep_time_minutes: request.prep_time_minutes,
            notes: request.notes.clone(),
        },
        steps,
    })
}

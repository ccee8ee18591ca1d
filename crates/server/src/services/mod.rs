//! Business logic for the cocktail catalog.
//!
//! Each service owns a pool handle and runs every multi-table mutation inside
//! a single transaction, so a failed operation leaves no partial state.

pub mod assembler;
pub mod catalog;
pub mod cocktails;
pub mod favorites;

use thiserror::Error;

use crate::db::RepositoryError;

pub use catalog::IngredientCatalog;
pub use cocktails::CocktailService;
pub use favorites::FavoritesLedger;

/// Minimum number of ingredient entries a cocktail creation request must carry.
pub const MIN_INGREDIENTS: usize = 2;

/// Instruction applied to every step when the request carries none.
pub const DEFAULT_INSTRUCTION: &str = "Stir the ingredients together";

/// Display fallback for a step whose ingredient record is missing.
pub const UNKNOWN_INGREDIENT: &str = "unknown ingredient";

/// Caller-correctable validation failures for cocktail creation and update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The cocktail name is empty after trimming.
    #[error("cocktail name must not be empty")]
    EmptyName,

    /// Fewer than the minimum number of ingredient entries.
    #[error("a cocktail needs at least {} ingredients", MIN_INGREDIENTS)]
    InsufficientIngredients,

    /// Two entries in the same request normalize to the same ingredient name.
    #[error("duplicate ingredient: {0}")]
    DuplicateIngredient(String),
}

/// Errors surfaced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request failed validation; safe to show the caller verbatim.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The target entity does not exist.
    #[error("not found")]
    NotFound,

    /// The (user, cocktail) pair is already favorited.
    #[error("cocktail already favorited")]
    AlreadyFavorited,

    /// Underlying store failure; not caller-correctable.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

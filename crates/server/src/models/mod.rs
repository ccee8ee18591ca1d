//! Domain models and request/response types.

pub mod cocktail;
pub mod favorite;
pub mod ingredient;

use serde::{Deserialize, Deserializer, Serialize};

pub use cocktail::{
    Cocktail, CocktailView, CreateCocktailRequest, IngredientEntry, NewCocktail, NewRecipeStep,
    RecipeStep, RecipeStepView, UpdateCocktailRequest,
};
pub use favorite::Favorite;
pub use ingredient::Ingredient;

/// Default page size when the client doesn't specify one.
const DEFAULT_PER_PAGE: i64 = 20;
/// Upper bound on page size to keep result sets reasonable.
const MAX_PER_PAGE: i64 = 100;

/// Pagination query parameters (`?page=0&per_page=20`).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    /// Zero-based page index.
    #[serde(default)]
    pub page: i64,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

pub(crate) const fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageParams {
    /// Effective row limit, clamped to `1..=MAX_PER_PAGE`.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }

    /// Row offset for the requested page. Saturates instead of overflowing
    /// on absurd page numbers.
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.page.max(0).saturating_mul(self.limit())
    }

    /// Zero-based page index, never negative.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.max(0)
    }
}

/// A page of results with pagination metadata.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Wrap a page of items with metadata derived from the query parameters
    /// and the total row count.
    #[must_use]
    pub fn new(items: Vec<T>, params: PageParams, total: i64) -> Self {
        let per_page = params.limit();
        Self {
            items,
            page: params.page(),
            per_page,
            total,
            // `i64::div_ceil` is unstable (`int_roundings`); this matches its
            // implementation exactly.
            total_pages: {
                let d = total / per_page;
                let r = total % per_page;
                if (r > 0 && per_page > 0) || (r < 0 && per_page < 0) {
                    d + 1
                } else {
                    d
                }
            },
        }
    }
}

/// Deserialize a field that distinguishes "absent" from "explicit null".
///
/// `None` means the field was omitted from the request; `Some(None)` means the
/// client sent an explicit `null`. Used by partial-update requests where
/// omission skips a field and `null` clears it.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_defaults() {
        let params = PageParams::default();
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_page_params_clamped() {
        let params = PageParams {
            page: -3,
            per_page: 5000,
        };
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.page(), 0);
    }

    #[test]
    fn test_page_offset() {
        let params = PageParams {
            page: 2,
            per_page: 25,
        };
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_page_offset_saturates() {
        let params = PageParams {
            page: i64::MAX,
            per_page: 100,
        };
        assert_eq!(params.offset(), i64::MAX);
    }

    #[test]
    fn test_page_metadata() {
        let params = PageParams {
            page: 0,
            per_page: 20,
        };
        let page = Page::new(vec![1, 2, 3], params, 41);
        assert_eq!(page.total, 41);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_page_metadata_empty() {
        let page: Page<i32> = Page::new(vec![], PageParams::default(), 0);
        assert_eq!(page.total_pages, 0);
    }
}

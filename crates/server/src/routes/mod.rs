//! HTTP routes mapping 1:1 onto the service operations.

pub mod cocktails;
pub mod favorites;
pub mod ingredients;

use axum::{Router, routing::get};
use serde::Deserialize;

use crate::models::PageParams;
use crate::state::AppState;

/// Build the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(cocktails::router())
        .merge(ingredients::router())
        .merge(favorites::router())
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "ok"
}

/// Query parameters shared by the paged listing endpoints.
///
/// Explicit fields rather than a flattened [`PageParams`]: serde's flatten
/// buffers values as strings, which breaks integer query parameters.
#[derive(Debug, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    page: i64,
    #[serde(default = "crate::models::default_per_page")]
    per_page: i64,
    /// Optional case-insensitive substring filter on the name.
    name: Option<String>,
}

impl ListQuery {
    pub(crate) const fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            per_page: self.per_page,
        }
    }

    /// The search term, if a non-blank one was supplied.
    pub(crate) fn term(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let q: ListQuery = serde_urlencoded::from_str("").expect("deserialize");
        assert_eq!(q.page_params().limit(), 20);
        assert_eq!(q.term(), None);
    }

    #[test]
    fn test_list_query_parses_params() {
        let q: ListQuery =
            serde_urlencoded::from_str("page=2&per_page=10&name=gin").expect("deserialize");
        assert_eq!(q.page_params().offset(), 20);
        assert_eq!(q.term(), Some("gin"));
    }

    #[test]
    fn test_blank_name_means_no_filter() {
        let q: ListQuery = serde_urlencoded::from_str("name=++").expect("deserialize");
        assert_eq!(q.term(), None);
    }
}

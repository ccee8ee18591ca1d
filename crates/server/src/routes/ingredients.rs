//! Ingredient API handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use barback_core::IngredientId;

use super::ListQuery;
use crate::error::AppError;
use crate::middleware::{AuthUser, Capability, require};
use crate::models::{Ingredient, Page};
use crate::state::AppState;

/// Build the ingredients router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ingredients", get(list))
        .route("/api/ingredients/{id}", axum::routing::delete(delete_one))
}

/// List catalog ingredients, optionally filtered by a name substring.
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Ingredient>>, AppError> {
    let page = state
        .catalog()
        .list(query.term(), query.page_params())
        .await?;
    Ok(Json(page))
}

/// Delete an ingredient, detaching any recipe steps that reference it.
/// Requires catalog management.
async fn delete_one(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<IngredientId>,
) -> Result<StatusCode, AppError> {
    require(&state, &actor, Capability::ManageCatalog)?;
    if state.catalog().delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("ingredient {id}")))
    }
}

//! Cocktail API handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use barback_core::CocktailId;

use super::ListQuery;
use crate::error::AppError;
use crate::middleware::{AuthUser, Capability, require};
use crate::models::{CocktailView, CreateCocktailRequest, Page, UpdateCocktailRequest};
use crate::state::AppState;

/// Build the cocktails router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/cocktails", get(list).post(create))
        .route(
            "/api/cocktails/{id}",
            get(get_one).put(update).delete(delete_one),
        )
}

/// List cocktails, optionally filtered by a name substring.
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<CocktailView>>, AppError> {
    let params = query.page_params();
    let page = match query.term() {
        Some(term) => state.cocktails().search(term, params).await?,
        None => state.cocktails().list(params).await?,
    };
    Ok(Json(page))
}

/// Get a single cocktail with its recipe.
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<CocktailId>,
) -> Result<Json<CocktailView>, AppError> {
    state
        .cocktails()
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("cocktail {id}")))
}

/// Create a cocktail with its recipe. Requires catalog management.
async fn create(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(request): Json<CreateCocktailRequest>,
) -> Result<(StatusCode, Json<CocktailView>), AppError> {
    require(&state, &actor, Capability::ManageCatalog)?;
    let view = state.cocktails().create(&request).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Partially update a cocktail's base fields. Requires catalog management.
async fn update(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<CocktailId>,
    Json(request): Json<UpdateCocktailRequest>,
) -> Result<Json<CocktailView>, AppError> {
    require(&state, &actor, Capability::ManageCatalog)?;
    let view = state.cocktails().update(id, &request).await?;
    Ok(Json(view))
}

/// Delete a cocktail and everything referencing it. Requires catalog management.
async fn delete_one(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<CocktailId>,
) -> Result<StatusCode, AppError> {
    require(&state, &actor, Capability::ManageCatalog)?;
    if state.cocktails().delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("cocktail {id}")))
    }
}

//! Favorites API handlers.
//!
//! Every route acts on the authenticated subject's own list; the subject is
//! taken from the gateway-forwarded identity headers, never from the request
//! body or path.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;

use barback_core::CocktailId;

use crate::error::AppError;
use crate::middleware::{AuthUser, Capability, require};
use crate::models::{CocktailView, Favorite};
use crate::state::AppState;

/// Build the favorites router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/favorites", get(list))
        .route("/api/favorites/count", get(count))
        .route("/api/favorites/check/{cocktail_id}", get(check))
        .route(
            "/api/favorites/{cocktail_id}",
            post(add).delete(remove),
        )
        .route("/api/favorites/toggle/{cocktail_id}", post(toggle))
}

/// Response for favorite membership queries and toggles.
#[derive(Debug, Serialize)]
struct FavoritedResponse {
    favorited: bool,
}

/// Response for the favorites count.
#[derive(Debug, Serialize)]
struct CountResponse {
    count: i64,
}

/// List the actor's favorite cocktails, hydrated.
async fn list(
    State(state): State<AppState>,
    actor: AuthUser,
) -> Result<Json<Vec<CocktailView>>, AppError> {
    let views = state.favorites().list(&actor.subject).await?;
    Ok(Json(views))
}

/// Count the actor's favorites.
async fn count(
    State(state): State<AppState>,
    actor: AuthUser,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.favorites().count(&actor.subject).await?;
    Ok(Json(CountResponse { count }))
}

/// Check whether a cocktail is in the actor's favorites.
async fn check(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(cocktail_id): Path<CocktailId>,
) -> Result<Json<FavoritedResponse>, AppError> {
    let favorited = state.favorites().exists(&actor.subject, cocktail_id).await?;
    Ok(Json(FavoritedResponse { favorited }))
}

/// Add a cocktail to the actor's favorites.
async fn add(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(cocktail_id): Path<CocktailId>,
) -> Result<(StatusCode, Json<Favorite>), AppError> {
    require(&state, &actor, Capability::UseFavorites)?;
    let favorite = state.favorites().add(&actor.subject, cocktail_id).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// Remove a cocktail from the actor's favorites.
async fn remove(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(cocktail_id): Path<CocktailId>,
) -> Result<StatusCode, AppError> {
    require(&state, &actor, Capability::UseFavorites)?;
    state.favorites().remove(&actor.subject, cocktail_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a favorite on or off; responds with the resulting membership.
async fn toggle(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(cocktail_id): Path<CocktailId>,
) -> Result<Json<FavoritedResponse>, AppError> {
    require(&state, &actor, Capability::UseFavorites)?;
    let favorited = state.favorites().toggle(&actor.subject, cocktail_id).await?;
    Ok(Json(FavoritedResponse { favorited }))
}

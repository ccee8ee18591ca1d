//! Barback server library.
//!
//! The cocktail catalog service: recipes assembled from a shared ingredient
//! catalog, per-user favorites, and the transactional lifecycle that keeps
//! them consistent. Exposed as a library so the binary stays thin and
//! integration tests can drive the services directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router with state and tracing applied.
#[must_use]
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Shared helpers for DB-backed integration tests.
//!
//! These tests require a running `PostgreSQL` database reachable via
//! `TEST_DATABASE_URL`. They are `#[ignore]`d so the default test run stays
//! self-contained; run them with:
//!
//! ```bash
//! TEST_DATABASE_URL=postgres://localhost/barback_test \
//!     cargo test -p barback-server -- --ignored
//! ```

#![allow(dead_code)]

use sqlx::PgPool;
use uuid::Uuid;

use barback_server::models::{CreateCocktailRequest, IngredientEntry};

/// Connect to the test database and ensure migrations are applied.
pub async fn test_pool() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// A unique suffix so concurrent test runs don't collide on shared
/// unique constraints (ingredient names, favorite pairs).
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// Build an ingredient entry without quantity or unit.
pub fn entry(name: &str) -> IngredientEntry {
    IngredientEntry {
        name: name.to_string(),
        quantity: None,
        unit: None,
    }
}

/// Build a minimal valid creation request from ingredient names.
pub fn request(name: &str, ingredients: &[String]) -> CreateCocktailRequest {
    CreateCocktailRequest {
        name: name.to_string(),
        description: None,
        prep_time_minutes: None,
        notes: None,
        ingredients: ingredients.iter().map(|n| entry(n)).collect(),
        instruction: None,
    }
}

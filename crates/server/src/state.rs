//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::middleware::{AccessPolicy, RolePolicy};
use crate::services::{CocktailService, FavoritesLedger, IngredientCatalog};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to shared
/// resources like the database pool, the access policy, and the services.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    policy: Box<dyn AccessPolicy>,
    catalog: IngredientCatalog,
    cocktails: CocktailService,
    favorites: FavoritesLedger,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Services receive explicit pool handles at construction; the access
    /// policy derives from the configured admin role.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let policy = Box::new(RolePolicy::new(config.admin_role.clone()));
        let catalog = IngredientCatalog::new(pool.clone());
        let cocktails = CocktailService::new(pool.clone());
        let favorites = FavoritesLedger::new(pool.clone(), cocktails.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                policy,
                catalog,
                cocktails,
                favorites,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the access policy.
    #[must_use]
    pub fn policy(&self) -> &dyn AccessPolicy {
        self.inner.policy.as_ref()
    }

    /// Get a reference to the ingredient catalog service.
    #[must_use]
    pub fn catalog(&self) -> &IngredientCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the cocktail aggregate service.
    #[must_use]
    pub fn cocktails(&self) -> &CocktailService {
        &self.inner.cocktails
    }

    /// Get a reference to the favorites ledger.
    #[must_use]
    pub fn favorites(&self) -> &FavoritesLedger {
        &self.inner.favorites
    }
}

//! Favorites ledger: per-user cocktail bookmarks.

use sqlx::PgPool;

use barback_core::{CocktailId, SubjectId};

use super::{CocktailService, ServiceError};
use crate::db::{self, RepositoryError};
use crate::models::{CocktailView, Favorite};

/// Service maintaining each user's set of favorite cocktails.
#[derive(Debug, Clone)]
pub struct FavoritesLedger {
    pool: PgPool,
    cocktails: CocktailService,
}

impl FavoritesLedger {
    /// Create a new ledger over a pool handle; hydration of favorited
    /// cocktails is delegated to the aggregate manager.
    #[must_use]
    pub const fn new(pool: PgPool, cocktails: CocktailService) -> Self {
        Self { pool, cocktails }
    }

    /// Add a cocktail to a user's favorites.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the cocktail doesn't exist and
    /// `ServiceError::AlreadyFavorited` if the pair is already present.
    pub async fn add(
        &self,
        user_id: &SubjectId,
        cocktail_id: CocktailId,
    ) -> Result<Favorite, ServiceError> {
        let mut tx = self.pool.begin().await?;

        if !db::cocktails::exists(&mut *tx, cocktail_id).await? {
            return Err(ServiceError::NotFound);
        }
        if db::favorites::exists(&mut *tx, user_id, cocktail_id).await? {
            return Err(ServiceError::AlreadyFavorited);
        }

        let favorite = db::favorites::insert(&mut *tx, user_id, cocktail_id)
            .await
            .map_err(conflict_to_already_favorited)?;

        tx.commit().await?;
        Ok(favorite)
    }

    /// Remove a cocktail from a user's favorites.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no such favorite exists.
    pub async fn remove(
        &self,
        user_id: &SubjectId,
        cocktail_id: CocktailId,
    ) -> Result<(), ServiceError> {
        if db::favorites::delete(&self.pool, user_id, cocktail_id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }

    /// Toggle a favorite: insert it if absent (returns `true`), remove it if
    /// present (returns `false`). One atomic check-then-act - the existence
    /// check and the write share a transaction. Both branches derive the
    /// outcome from the write itself, not the check: the unique
    /// `(user_id, cocktail_id)` constraint converts a lost insert race into a
    /// conflict, and a DELETE that affects zero rows (a concurrent toggle
    /// removed the favorite first) falls through to the insert branch, so
    /// racing toggles always land on one serializable order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the cocktail doesn't exist.
    pub async fn toggle(
        &self,
        user_id: &SubjectId,
        cocktail_id: CocktailId,
    ) -> Result<bool, ServiceError> {
        let mut tx = self.pool.begin().await?;

        if !db::cocktails::exists(&mut *tx, cocktail_id).await? {
            return Err(ServiceError::NotFound);
        }

        let removed = if db::favorites::find(&mut *tx, user_id, cocktail_id)
            .await?
            .is_some()
        {
            db::favorites::delete(&mut *tx, user_id, cocktail_id).await?
        } else {
            false
        };

        let favorited = if removed {
            false
        } else {
            db::favorites::insert(&mut *tx, user_id, cocktail_id)
                .await
                .map_err(conflict_to_already_favorited)?;
            true
        };

        tx.commit().await?;
        Ok(favorited)
    }

    /// List a user's favorite cocktails, hydrated, oldest favorite first.
    ///
    /// A favorite whose target cocktail has vanished (should be impossible
    /// given the deletion cascade) is silently skipped.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn list(&self, user_id: &SubjectId) -> Result<Vec<CocktailView>, ServiceError> {
        let favorites = db::favorites::list_for_user(&self.pool, user_id).await?;

        let mut views = Vec::with_capacity(favorites.len());
        for favorite in favorites {
            if let Some(view) = self.cocktails.get(favorite.cocktail_id).await? {
                views.push(view);
            }
        }
        Ok(views)
    }

    /// Count a user's favorites.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn count(&self, user_id: &SubjectId) -> Result<i64, ServiceError> {
        let count = db::favorites::count_for_user(&self.pool, user_id).await?;
        Ok(count)
    }

    /// Check whether a cocktail is in a user's favorites.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn exists(
        &self,
        user_id: &SubjectId,
        cocktail_id: CocktailId,
    ) -> Result<bool, ServiceError> {
        let exists = db::favorites::exists(&self.pool, user_id, cocktail_id).await?;
        Ok(exists)
    }
}

/// A unique-constraint conflict on insert means another request won the race.
fn conflict_to_already_favorited(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::Conflict(_) => ServiceError::AlreadyFavorited,
        other => ServiceError::Repository(other),
    }
}

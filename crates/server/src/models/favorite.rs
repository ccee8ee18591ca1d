//! Per-user favorite bookmarks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use barback_core::{CocktailId, FavoriteId, SubjectId};

/// A favorite: one user's bookmark of one cocktail.
///
/// The `(user_id, cocktail_id)` pair is unique. Favorites are destroyed when
/// their cocktail is destroyed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    /// Unique favorite ID.
    pub id: FavoriteId,
    /// Opaque authenticated-user identifier.
    pub user_id: SubjectId,
    /// Bookmarked cocktail.
    pub cocktail_id: CocktailId,
    /// When the favorite was created.
    pub created_at: DateTime<Utc>,
}

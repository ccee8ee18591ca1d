//! DB-backed integration tests for the favorites ledger.

#![allow(clippy::unwrap_used)]

mod common;

use barback_core::{CocktailId, SubjectId};
use barback_server::services::{CocktailService, FavoritesLedger, ServiceError};

use common::{request, test_pool, unique};

fn ledger(pool: sqlx::PgPool) -> (CocktailService, FavoritesLedger) {
    let cocktails = CocktailService::new(pool.clone());
    let favorites = FavoritesLedger::new(pool, cocktails.clone());
    (cocktails, favorites)
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn test_add_list_count_remove_round_trip() {
    let pool = test_pool().await;
    let (cocktails, favorites) = ledger(pool);
    let user = SubjectId::new(unique("user"));

    let first = cocktails
        .create(&request(&unique("Mojito"), &[unique("rum"), unique("mint")]))
        .await
        .unwrap();
    let second = cocktails
        .create(&request(&unique("Paloma"), &[unique("tequila"), unique("grapefruit")]))
        .await
        .unwrap();

    let favorite = favorites.add(&user, first.id).await.unwrap();
    assert_eq!(favorite.cocktail_id, first.id);
    assert_eq!(favorite.user_id, user);

    favorites.add(&user, second.id).await.unwrap();

    assert_eq!(favorites.count(&user).await.unwrap(), 2);
    assert!(favorites.exists(&user, first.id).await.unwrap());

    // Oldest favorite first, hydrated with its recipe.
    let listed = favorites.list(&user).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, first.id);
    assert_eq!(listed[0].steps.len(), 2);
    assert_eq!(listed[1].id, second.id);

    favorites.remove(&user, first.id).await.unwrap();
    assert_eq!(favorites.count(&user).await.unwrap(), 1);
    assert!(!favorites.exists(&user, first.id).await.unwrap());
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn test_add_twice_reports_already_favorited() {
    let pool = test_pool().await;
    let (cocktails, favorites) = ledger(pool);
    let user = SubjectId::new(unique("user"));

    let view = cocktails
        .create(&request(&unique("Negroni"), &[unique("gin"), unique("campari")]))
        .await
        .unwrap();

    favorites.add(&user, view.id).await.unwrap();
    let err = favorites.add(&user, view.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyFavorited));

    // Still exactly one favorite.
    assert_eq!(favorites.count(&user).await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn test_add_and_toggle_missing_cocktail_is_not_found() {
    let pool = test_pool().await;
    let (_, favorites) = ledger(pool);
    let user = SubjectId::new(unique("user"));
    let missing = CocktailId::new(i32::MAX);

    assert!(matches!(
        favorites.add(&user, missing).await.unwrap_err(),
        ServiceError::NotFound
    ));
    assert!(matches!(
        favorites.toggle(&user, missing).await.unwrap_err(),
        ServiceError::NotFound
    ));
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn test_remove_missing_favorite_is_not_found() {
    let pool = test_pool().await;
    let (cocktails, favorites) = ledger(pool);
    let user = SubjectId::new(unique("user"));

    let view = cocktails
        .create(&request(&unique("Spritz"), &[unique("aperol"), unique("prosecco")]))
        .await
        .unwrap();

    let err = favorites.remove(&user, view.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn test_toggle_flips_membership() {
    let pool = test_pool().await;
    let (cocktails, favorites) = ledger(pool);
    let user = SubjectId::new(unique("user"));

    let view = cocktails
        .create(&request(&unique("Boulevardier"), &[unique("rye"), unique("vermouth")]))
        .await
        .unwrap();

    assert!(favorites.toggle(&user, view.id).await.unwrap());
    assert!(favorites.exists(&user, view.id).await.unwrap());

    assert!(!favorites.toggle(&user, view.id).await.unwrap());
    assert!(!favorites.exists(&user, view.id).await.unwrap());
    assert_eq!(favorites.count(&user).await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn test_racing_toggles_land_on_one_serializable_order() {
    let pool = test_pool().await;
    let (cocktails, favorites) = ledger(pool);
    let user = SubjectId::new(unique("user"));

    let view = cocktails
        .create(&request(&unique("Vesper"), &[unique("gin"), unique("vodka")]))
        .await
        .unwrap();
    favorites.add(&user, view.id).await.unwrap();

    // Starting from an existing favorite, two racing toggles must behave as
    // if run in sequence: one removes (false), the other re-adds (true). A
    // toggle whose DELETE lost the race falls through to the insert branch
    // instead of reporting a removal that never happened.
    let (first, second) = tokio::join!(
        favorites.toggle(&user, view.id),
        favorites.toggle(&user, view.id),
    );
    let (first, second) = (first.unwrap(), second.unwrap());

    assert!(first ^ second);
    assert!(favorites.exists(&user, view.id).await.unwrap());
    assert_eq!(favorites.count(&user).await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn test_cocktail_delete_cascades_into_favorites() {
    let pool = test_pool().await;
    let (cocktails, favorites) = ledger(pool);

    let view = cocktails
        .create(&request(&unique("Last Word"), &[unique("gin"), unique("chartreuse")]))
        .await
        .unwrap();

    let users: Vec<SubjectId> = (0..3).map(|_| SubjectId::new(unique("user"))).collect();
    for user in &users {
        favorites.add(user, view.id).await.unwrap();
    }

    assert!(cocktails.delete(view.id).await.unwrap());

    for user in &users {
        assert!(!favorites.exists(user, view.id).await.unwrap());
        assert_eq!(favorites.count(user).await.unwrap(), 0);
        assert!(favorites.list(user).await.unwrap().is_empty());
    }
}

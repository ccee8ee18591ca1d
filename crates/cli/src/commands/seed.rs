//! Seed the database with a handful of classic cocktails for local
//! development.

use barback_server::config::ServerConfig;
use barback_server::db;
use barback_server::models::{CreateCocktailRequest, IngredientEntry};
use barback_server::services::CocktailService;
use rust_decimal::Decimal;

use super::CommandError;

fn entry(name: &str, quantity: Option<Decimal>, unit: Option<&str>) -> IngredientEntry {
    IngredientEntry {
        name: name.to_string(),
        quantity,
        unit: unit.map(String::from),
    }
}

fn sample_cocktails() -> Vec<CreateCocktailRequest> {
    vec![
        CreateCocktailRequest {
            name: "Margarita".to_string(),
            description: Some("Tequila sour with lime and orange liqueur".to_string()),
            prep_time_minutes: Some(5),
            notes: Some("Salt rim optional".to_string()),
            ingredients: vec![
                entry("tequila", Some(Decimal::new(2, 0)), Some("oz")),
                entry("lime juice", Some(Decimal::new(1, 0)), Some("oz")),
                entry("triple sec", Some(Decimal::new(5, 1)), Some("oz")),
            ],
            instruction: Some("Shake with ice and strain".to_string()),
        },
        CreateCocktailRequest {
            name: "Negroni".to_string(),
            description: Some("Equal-parts bitter aperitivo".to_string()),
            prep_time_minutes: Some(3),
            notes: None,
            ingredients: vec![
                entry("gin", Some(Decimal::new(1, 0)), Some("oz")),
                entry("campari", Some(Decimal::new(1, 0)), Some("oz")),
                entry("sweet vermouth", Some(Decimal::new(1, 0)), Some("oz")),
            ],
            instruction: Some("Stir over ice, garnish with orange peel".to_string()),
        },
        CreateCocktailRequest {
            name: "Daiquiri".to_string(),
            description: Some("Rum, lime, sugar".to_string()),
            prep_time_minutes: Some(4),
            notes: None,
            ingredients: vec![
                entry("white rum", Some(Decimal::new(2, 0)), Some("oz")),
                entry("lime juice", Some(Decimal::new(1, 0)), Some("oz")),
                entry("simple syrup", Some(Decimal::new(75, 2)), Some("oz")),
            ],
            instruction: None,
        },
    ]
}

/// Insert the sample cocktails.
///
/// # Errors
///
/// Returns `CommandError` if configuration is missing or the store fails.
pub async fn run() -> Result<(), CommandError> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    let cocktails = CocktailService::new(pool);

    for request in sample_cocktails() {
        let view = cocktails.create(&request).await?;
        tracing::info!(cocktail_id = %view.id, name = %view.name, "seeded cocktail");
    }

    tracing::info!("Seeding complete");
    Ok(())
}

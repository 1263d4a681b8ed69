use rust_decimal::{Decimal, dec};
use sqlx::PgPool;

use crate::{
    config::AppConfig,
    error::Result,
    models::{CreateCategoryRequest, ProductRequest},
    queries::{category_queries, geo_queries, product_queries, user_queries},
    services::geo_service,
};

const DEFAULT_CATEGORIES: [&str; 11] = [
    "Electronics",
    "Food",
    "Technology",
    "Clothing",
    "Gamer",
    "Beauty",
    "Nutrition",
    "Footwear",
    "Sports",
    "Pets",
    "Apple",
];

const SAMPLE_PRODUCTS: [(&str, Decimal, Decimal, &[&str]); 8] = [
    ("Adidas Barracuda", dec!(2700), dec!(12), &["Footwear", "Sports"]),
    ("AirPods", dec!(13000), dec!(12), &["Technology", "Apple"]),
    ("Bose Headphones", dec!(8700), dec!(12), &["Technology"]),
    ("Plaid Shirt", dec!(560), dec!(24), &["Clothing"]),
    ("iPad", dec!(23000), dec!(6), &["Technology", "Apple"]),
    ("Dumbbells", dec!(3700), dec!(12), &["Sports"]),
    ("Whey Protein", dec!(2520), dec!(12), &["Nutrition"]),
    ("Gamer Keyboard", dec!(670), dec!(12), &["Gamer", "Technology"]),
];

pub async fn run(pool: &PgPool, config: &AppConfig) -> Result<()> {
    seed_categories(pool).await?;
    seed_admin_user(pool).await?;
    seed_products(pool).await?;
    seed_geography(pool, config).await?;

    tracing::info!("Startup seeding finished");
    Ok(())
}

async fn seed_categories(pool: &PgPool) -> Result<()> {
    if !category_queries::get_all(pool).await?.is_empty() {
        return Ok(());
    }

    for name in DEFAULT_CATEGORIES {
        category_queries::create_category(
            pool,
            CreateCategoryRequest {
                name: name.to_string(),
            },
        )
        .await?;
    }

    tracing::info!("Seeded {} categories", DEFAULT_CATEGORIES.len());
    Ok(())
}

async fn seed_admin_user(pool: &PgPool) -> Result<()> {
    let admin_email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@shopcar.example".to_string());

    if user_queries::find_by_email(pool, &admin_email).await?.is_some() {
        return Ok(());
    }

    let admin_password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "abc-123-ABC".to_string());
    let password_hash = bcrypt::hash(&admin_password, bcrypt::DEFAULT_COST)
        .map_err(|e| crate::error::AppError::InternalError(format!("Password hashing failed: {}", e)))?;

    sqlx::query(
        "INSERT INTO users (email, first_name, last_name, password, role, email_verified)
         VALUES ($1, $2, $3, $4, 'admin', TRUE)",
    )
    .bind(&admin_email)
    .bind("Admin")
    .bind("User")
    .bind(&password_hash)
    .execute(pool)
    .await?;

    tracing::info!("Seeded admin user {}", admin_email);
    Ok(())
}

async fn seed_products(pool: &PgPool) -> Result<()> {
    if !product_queries::get_in_stock(pool).await?.is_empty() {
        return Ok(());
    }

    for (name, price, stock, categories) in SAMPLE_PRODUCTS {
        let product = crate::queries::admin_queries::create_product(
            pool,
            &ProductRequest {
                name: Some(name.to_string()),
                description: Some(name.to_string()),
                price: Some(price),
                stock: Some(stock),
            },
        )
        .await?;

        let mut category_ids = Vec::new();
        for category_name in categories {
            if let Some(category) = category_queries::find_by_name(pool, category_name).await? {
                category_ids.push(category.id);
            }
        }

        category_queries::assign_categories_to_product(pool, product.id, &category_ids).await?;
    }

    tracing::info!("Seeded {} sample products", SAMPLE_PRODUCTS.len());
    Ok(())
}

/// One-time country -> state -> city import from the geography API. States
/// and countries without any usable city are not stored.
async fn seed_geography(pool: &PgPool, config: &AppConfig) -> Result<()> {
    if geo_queries::count_countries(pool).await? > 0 {
        return Ok(());
    }

    let api_key = match &config.geo.api_key {
        Some(key) => key,
        None => {
            tracing::warn!("GEO_API_KEY not set, skipping geography import");
            return Ok(());
        }
    };

    let client = reqwest::Client::new();
    let base_url = &config.geo.base_url;

    let countries = geo_service::fetch_countries(&client, base_url, api_key).await?;
    tracing::info!("Importing geography for {} countries", countries.len());

    for country in countries {
        let states = match geo_service::fetch_states(&client, base_url, api_key, &country.iso2).await
        {
            Ok(states) => states,
            Err(e) => {
                tracing::warn!("Skipping states of {}: {}", country.name, e);
                continue;
            }
        };

        let mut populated_states: Vec<(String, Vec<String>)> = Vec::new();

        for state in states {
            let cities = match geo_service::fetch_cities(
                &client,
                base_url,
                api_key,
                &country.iso2,
                &state.iso2,
            )
            .await
            {
                Ok(cities) => cities,
                Err(e) => {
                    tracing::warn!("Skipping cities of {}/{}: {}", country.name, state.name, e);
                    continue;
                }
            };

            let city_names = geo_service::usable_city_names(cities);
            if !city_names.is_empty() {
                populated_states.push((state.name, city_names));
            }
        }

        if populated_states.is_empty() {
            continue;
        }

        let country_id = geo_queries::insert_country(pool, &country.name).await?;
        for (state_name, city_names) in populated_states {
            let state_id = geo_queries::insert_state(pool, country_id, &state_name).await?;
            geo_queries::insert_cities(pool, state_id, &city_names).await?;
        }
    }

    tracing::info!("Geography import finished");
    Ok(())
}

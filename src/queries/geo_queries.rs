use sqlx::PgPool;

use crate::{error::Result, models::ComboItem};

pub async fn get_countries(pool: &PgPool) -> Result<Vec<ComboItem>> {
    let countries =
        sqlx::query_as::<_, ComboItem>("SELECT id, name FROM countries ORDER BY name ASC")
            .fetch_all(pool)
            .await?;

    Ok(countries)
}

pub async fn get_states(pool: &PgPool, country_id: i32) -> Result<Vec<ComboItem>> {
    let states = sqlx::query_as::<_, ComboItem>(
        "SELECT id, name FROM states WHERE country_id = $1 ORDER BY name ASC",
    )
    .bind(country_id)
    .fetch_all(pool)
    .await?;

    Ok(states)
}

pub async fn get_cities(pool: &PgPool, state_id: i32) -> Result<Vec<ComboItem>> {
    let cities = sqlx::query_as::<_, ComboItem>(
        "SELECT id, name FROM cities WHERE state_id = $1 ORDER BY name ASC",
    )
    .bind(state_id)
    .fetch_all(pool)
    .await?;

    Ok(cities)
}

pub async fn count_countries(pool: &PgPool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM countries")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn insert_country(pool: &PgPool, name: &str) -> Result<i32> {
    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO countries (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

pub async fn insert_state(pool: &PgPool, country_id: i32, name: &str) -> Result<i32> {
    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO states (country_id, name) VALUES ($1, $2)
         ON CONFLICT (country_id, name) DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .bind(country_id)
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

pub async fn insert_cities(pool: &PgPool, state_id: i32, names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Ok(());
    }

    let mut query_builder = sqlx::QueryBuilder::new("INSERT INTO cities (state_id, name) ");

    query_builder.push_values(names, |mut b, name| {
        b.push_bind(state_id).push_bind(name);
    });

    query_builder.push(" ON CONFLICT (state_id, name) DO NOTHING");
    query_builder.build().execute(pool).await?;

    Ok(())
}

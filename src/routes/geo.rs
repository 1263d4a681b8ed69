use axum::{
    Json,
    extract::{Path, State},
};

use crate::{AppState, error::Result, models::ComboItem, queries::geo_queries};

pub async fn get_countries(State(state): State<AppState>) -> Result<Json<Vec<ComboItem>>> {
    let countries = geo_queries::get_countries(&state.db).await?;

    Ok(Json(countries))
}

pub async fn get_states(
    State(state): State<AppState>,
    Path(country_id): Path<i32>,
) -> Result<Json<Vec<ComboItem>>> {
    let states = geo_queries::get_states(&state.db, country_id).await?;

    Ok(Json(states))
}

pub async fn get_cities(
    State(state): State<AppState>,
    Path(state_id): Path<i32>,
) -> Result<Json<Vec<ComboItem>>> {
    let cities = geo_queries::get_cities(&state.db, state_id).await?;

    Ok(Json(cities))
}

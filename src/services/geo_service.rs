use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{AppError, Result};

const API_KEY_HEADER: &str = "X-CSCAPI-KEY";

// The upstream feed double-reports these two cities with broken encodings
const EXCLUDED_CITIES: [&str; 2] = ["Mosfellsbær", "Șăulița"];

#[derive(Debug, Clone, Deserialize)]
pub struct CountryEntry {
    pub name: String,
    pub iso2: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StateEntry {
    pub name: String,
    pub iso2: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CityEntry {
    pub name: String,
}

pub fn is_excluded_city(name: &str) -> bool {
    EXCLUDED_CITIES.contains(&name)
}

/// Collapses duplicate names, keeping first occurrence order.
pub fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

async fn get_list<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    path: &str,
) -> Result<Vec<T>> {
    let response = client
        .get(format!("{}{}", base_url, path))
        .header(API_KEY_HEADER, api_key)
        .send()
        .await
        .map_err(|e| AppError::CollaboratorError(format!("Geo API request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::CollaboratorError(format!(
            "Geo API returned {} for {}",
            response.status(),
            path
        )));
    }

    response
        .json::<Vec<T>>()
        .await
        .map_err(|e| AppError::CollaboratorError(format!("Invalid geo API response: {}", e)))
}

pub async fn fetch_countries(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
) -> Result<Vec<CountryEntry>> {
    get_list(client, base_url, api_key, "/countries").await
}

pub async fn fetch_states(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    country_iso2: &str,
) -> Result<Vec<StateEntry>> {
    get_list(
        client,
        base_url,
        api_key,
        &format!("/countries/{}/states", country_iso2),
    )
    .await
}

pub async fn fetch_cities(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    country_iso2: &str,
    state_iso2: &str,
) -> Result<Vec<CityEntry>> {
    get_list(
        client,
        base_url,
        api_key,
        &format!("/countries/{}/states/{}/cities", country_iso2, state_iso2),
    )
    .await
}

/// City names ready for insertion: exclusions dropped, duplicates collapsed.
pub fn usable_city_names(cities: Vec<CityEntry>) -> Vec<String> {
    dedup_names(
        cities
            .into_iter()
            .map(|city| city.name)
            .filter(|name| !is_excluded_city(name))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_city_names_collapse() {
        let names = dedup_names(vec![
            "Springfield".to_string(),
            "Shelbyville".to_string(),
            "Springfield".to_string(),
        ]);

        assert_eq!(names, vec!["Springfield", "Shelbyville"]);
    }

    #[test]
    fn known_bad_cities_are_dropped() {
        let cities = vec![
            CityEntry { name: "Reykjavík".to_string() },
            CityEntry { name: "Mosfellsbær".to_string() },
            CityEntry { name: "Șăulița".to_string() },
        ];

        let usable = usable_city_names(cities);
        assert_eq!(usable, vec!["Reykjavík"]);
    }
}

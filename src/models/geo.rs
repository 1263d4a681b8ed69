use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Country {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct State {
    pub id: i32,
    pub country_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct City {
    pub id: i32,
    pub state_id: i32,
    pub name: String,
}

/// {id, name} pair backing the cascading dropdowns.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ComboItem {
    pub id: i32,
    pub name: String,
}

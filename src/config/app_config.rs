use crate::error::{AppError, Result};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Staging,
    Main,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub mail: MailConfig,
    pub orders: OrdersConfig,
    pub geo: GeoApiConfig,
    pub environment: Environment,
    pub seed_on_startup: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub assets_url: String,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub sender_email: String,
}

/// Endpoint of the order-processing service checkout hands carts to.
#[derive(Debug, Clone)]
pub struct OrdersConfig {
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct GeoApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let environment = match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "staging".to_string())
            .as_str()
        {
            "main" => Environment::Main,
            _ => Environment::Staging,
        };

        Ok(Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .map_err(|_| AppError::ConfigError("Invalid PORT value".to_string()))?,
                max_body_size: env::var("MAX_BODY_SIZE")
                    .unwrap_or_else(|_| "10485760".to_string())
                    .parse()
                    .map_err(|_| AppError::ConfigError("Invalid MAX_BODY_SIZE value".to_string()))?,
            },
            database: DatabaseConfig {
                url: env::var("DB_URL")?,
                max_connections: env::var("DB_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::ConfigError("Invalid DB_MAX_CONNECTIONS value".to_string())
                    })?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("FRONTEND_URL")?
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
            storage: StorageConfig {
                bucket: env::var("S3_BUCKET")?,
                assets_url: env::var("ASSETS_URL")?,
            },
            mail: MailConfig {
                sender_email: env::var("SENDER_EMAIL")
                    .unwrap_or_else(|_| "noreply@shopcar.example".to_string()),
            },
            orders: OrdersConfig {
                base_url: env::var("ORDERS_URL")?,
            },
            geo: GeoApiConfig {
                base_url: env::var("GEO_API_URL")
                    .unwrap_or_else(|_| "https://api.countrystatecity.in/v1".to_string()),
                api_key: env::var("GEO_API_KEY").ok(),
            },
            environment,
            seed_on_startup: env::var("SEED_ON_STARTUP")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
};
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sesv2::Client as SesClient;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;

use crate::{
    config::{self, AppConfig, Environment},
    database,
    error::Result,
    routes,
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3_client: S3Client,
    pub ses_client: SesClient,
    pub environment: Environment,
    pub s3_bucket: String,
    pub assets_url: String,
    pub sender_email: String,
    pub orders_url: String,
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database).await?;

    crate::queries::email_queries::cleanup_expired_codes(&pool).await?;

    if config.seed_on_startup {
        database::seed::run(&pool, config).await?;
    }

    let s3_client = config::load_s3_client().await?;
    let ses_client = config::load_ses_client().await?;

    let state = AppState {
        db: pool,
        s3_client,
        ses_client,
        environment: config.environment,
        s3_bucket: config.storage.bucket.clone(),
        assets_url: config.storage.assets_url.clone(),
        sender_email: config.mail.sender_email.clone(),
        orders_url: config.orders.base_url.clone(),
    };

    let allowed_origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|_| {
                crate::error::AppError::ConfigError(format!("Invalid CORS origin: {}", origin))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
        .allow_origin(allowed_origins);

    let app = routes::create_router()
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors)
        .with_state(state);

    Ok(app)
}

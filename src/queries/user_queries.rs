use sqlx::PgPool;

use crate::{
    error::Result,
    models::{RegisterRequest, UpdateProfileRequest, User, UserProfile},
};

pub async fn create_user(pool: &PgPool, req: &RegisterRequest, password_hash: &str) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, first_name, last_name, password, document, address, phone_number, city_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING *",
    )
    .bind(&req.email)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(password_hash)
    .bind(&req.document)
    .bind(&req.address)
    .bind(&req.phone_number)
    .bind(req.city_id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Profile with city/state/country flattened in one explicit join. The
/// location chain is fetched here, not navigated lazily.
pub async fn get_profile(pool: &PgPool, id: i32) -> Result<Option<UserProfile>> {
    let profile = sqlx::query_as::<_, UserProfile>(
        "SELECT
            u.id, u.email, u.first_name, u.last_name, u.document, u.address,
            u.phone_number, u.image_uuid, u.role, u.city_id,
            ci.name AS city_name,
            st.name AS state_name,
            co.name AS country_name,
            u.created_at
         FROM users u
         LEFT JOIN cities ci ON ci.id = u.city_id
         LEFT JOIN states st ON st.id = ci.state_id
         LEFT JOIN countries co ON co.id = st.country_id
         WHERE u.id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

pub async fn update_profile(
    pool: &PgPool,
    id: i32,
    req: &UpdateProfileRequest,
) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users
         SET
            first_name = COALESCE($1, first_name),
            last_name = COALESCE($2, last_name),
            document = COALESCE($3, document),
            address = COALESCE($4, address),
            phone_number = COALESCE($5, phone_number),
            city_id = COALESCE($6, city_id),
            updated_at = NOW()
         WHERE id = $7
         RETURNING *",
    )
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.document)
    .bind(&req.address)
    .bind(&req.phone_number)
    .bind(req.city_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn set_image(pool: &PgPool, id: i32, image_uuid: uuid::Uuid) -> Result<()> {
    sqlx::query("UPDATE users SET image_uuid = $1, updated_at = NOW() WHERE id = $2")
        .bind(image_uuid)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn set_password(pool: &PgPool, email: &str, password_hash: &str) -> Result<bool> {
    let result = sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE email = $2")
        .bind(password_hash)
        .bind(email)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn mark_email_verified(pool: &PgPool, email: &str) -> Result<bool> {
    let result =
        sqlx::query("UPDATE users SET email_verified = TRUE, updated_at = NOW() WHERE email = $1")
            .bind(email)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}

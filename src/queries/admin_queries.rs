use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    error::{AppError, Result},
    models::{
        Product, ProductImage, ProductRequest, UserProfile, UserQuery, UserRequest,
        UserSearchResponse,
    },
};

pub async fn create_product(pool: &PgPool, req: &ProductRequest) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, description, price, stock)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(&req.price)
    .bind(req.stock.unwrap_or(Decimal::ZERO))
    .fetch_one(pool)
    .await?;

    Ok(product)
}

pub async fn update_product(pool: &PgPool, id: i32, req: &ProductRequest) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products
         SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            price = COALESCE($3, price),
            stock = COALESCE($4, stock),
            updated_at = NOW()
         WHERE id = $5
         RETURNING *",
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(&req.price)
    .bind(&req.stock)
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

pub async fn delete_product(pool: &PgPool, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn add_product_image(
    pool: &PgPool,
    product_id: i32,
    image_uuid: uuid::Uuid,
    extension: &str,
    is_primary: bool,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO product_images (product_id, image_uuid, extension, is_primary)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(product_id)
    .bind(image_uuid)
    .bind(extension)
    .bind(is_primary)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_product_image(
    pool: &PgPool,
    product_id: i32,
    image_uuid: uuid::Uuid,
) -> Result<Option<ProductImage>> {
    let deleted_image = sqlx::query_as::<_, ProductImage>(
        "DELETE FROM product_images WHERE product_id = $1 AND image_uuid = $2 RETURNING *",
    )
    .bind(product_id)
    .bind(image_uuid)
    .fetch_optional(pool)
    .await?;

    Ok(deleted_image)
}

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

pub async fn search_users(pool: &PgPool, params: UserQuery) -> Result<UserSearchResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0);

    let mut query_builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(
        "SELECT
            u.id, u.email, u.first_name, u.last_name, u.document, u.address,
            u.phone_number, u.image_uuid, u.role, u.city_id,
            ci.name AS city_name,
            st.name AS state_name,
            co.name AS country_name,
            u.created_at,
            COUNT(*) OVER() AS total_count
         FROM users u
         LEFT JOIN cities ci ON ci.id = u.city_id
         LEFT JOIN states st ON st.id = ci.state_id
         LEFT JOIN countries co ON co.id = st.country_id
         WHERE 1=1",
    );

    if let Some(id) = params.id {
        query_builder.push(" AND u.id = ");
        query_builder.push_bind(id);
    }

    if let Some(ref email) = params.email {
        query_builder.push(" AND u.email ILIKE ");
        query_builder.push_bind(format!("%{}%", email));
    }

    query_builder.push(" ORDER BY u.created_at DESC");
    query_builder.push(" LIMIT ");
    query_builder.push_bind(limit);
    query_builder.push(" OFFSET ");
    query_builder.push_bind(offset);

    #[derive(sqlx::FromRow)]
    struct SearchResult {
        #[sqlx(flatten)]
        user: UserProfile,
        total_count: i64,
    }

    let results = query_builder
        .build_query_as::<SearchResult>()
        .fetch_all(pool)
        .await?;

    let total = results.first().map(|r| r.total_count).unwrap_or(0);
    let users = results.into_iter().map(|r| r.user).collect();

    Ok(UserSearchResponse {
        users,
        total,
        limit,
        offset,
    })
}

pub async fn update_user(pool: &PgPool, id: i32, req: &UserRequest) -> Result<UserProfile> {
    sqlx::query(
        "UPDATE users
         SET
            email = COALESCE($1, email),
            first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            role = COALESCE($4, role),
            city_id = COALESCE($5, city_id),
            updated_at = NOW()
         WHERE id = $6",
    )
    .bind(&req.email)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.role)
    .bind(req.city_id)
    .bind(id)
    .execute(pool)
    .await?;

    crate::queries::user_queries::get_profile(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
}

pub async fn delete_user(pool: &PgPool, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

use sqlx::PgPool;

use crate::{
    error::Result,
    models::{CartLine, CartLineView},
};

/// Inserts a new line unconditionally. Repeated adds of the same product
/// produce distinct lines; lines are never merged.
pub async fn add_line(
    pool: &PgPool,
    user_id: i32,
    product_id: i32,
    quantity: i32,
    remarks: Option<&str>,
) -> Result<CartLine> {
    let line = sqlx::query_as::<_, CartLine>(
        "INSERT INTO cart_lines (user_id, product_id, quantity, remarks)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .bind(remarks)
    .fetch_one(pool)
    .await?;

    Ok(line)
}

/// Atomic increment; user_id in the predicate keeps lines private to their
/// owner. Returns None when the line does not exist for this user.
pub async fn increase_quantity(
    pool: &PgPool,
    user_id: i32,
    line_id: i32,
) -> Result<Option<CartLine>> {
    let line = sqlx::query_as::<_, CartLine>(
        "UPDATE cart_lines
         SET quantity = quantity + 1, updated_at = NOW()
         WHERE id = $1 AND user_id = $2
         RETURNING *",
    )
    .bind(line_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(line)
}

/// Atomic decrement floored at 1; quantity never drops below 1 and the line
/// is never deleted here.
pub async fn decrease_quantity(
    pool: &PgPool,
    user_id: i32,
    line_id: i32,
) -> Result<Option<CartLine>> {
    let line = sqlx::query_as::<_, CartLine>(
        "UPDATE cart_lines
         SET quantity = GREATEST(quantity - 1, 1), updated_at = NOW()
         WHERE id = $1 AND user_id = $2
         RETURNING *",
    )
    .bind(line_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(line)
}

/// Overwrites quantity and remarks in one statement.
pub async fn edit_line(
    pool: &PgPool,
    user_id: i32,
    line_id: i32,
    quantity: i32,
    remarks: Option<&str>,
) -> Result<Option<CartLine>> {
    let line = sqlx::query_as::<_, CartLine>(
        "UPDATE cart_lines
         SET quantity = $3, remarks = $4, updated_at = NOW()
         WHERE id = $1 AND user_id = $2
         RETURNING *",
    )
    .bind(line_id)
    .bind(user_id)
    .bind(quantity)
    .bind(remarks)
    .fetch_optional(pool)
    .await?;

    Ok(line)
}

pub async fn delete_line(pool: &PgPool, user_id: i32, line_id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM cart_lines WHERE id = $1 AND user_id = $2")
        .bind(line_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// All of the user's lines joined with current product data and the primary
/// image, straight from the store. No caching in front of this.
pub async fn get_cart_lines(pool: &PgPool, user_id: i32) -> Result<Vec<CartLineView>> {
    let lines = sqlx::query_as::<_, CartLineView>(
        "SELECT
            cl.id,
            cl.product_id,
            p.name AS product_name,
            p.price AS unit_price,
            cl.quantity,
            cl.remarks,
            pi.image_uuid,
            pi.extension AS image_extension
         FROM cart_lines cl
         INNER JOIN products p ON p.id = cl.product_id
         LEFT JOIN LATERAL (
            SELECT image_uuid, extension
            FROM product_images
            WHERE product_id = p.id
            ORDER BY is_primary DESC, created_at ASC
            LIMIT 1
         ) pi ON TRUE
         WHERE cl.user_id = $1
         ORDER BY cl.created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(lines)
}

pub async fn count_quantity(pool: &PgPool, user_id: i32) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COALESCE(SUM(quantity), 0)::bigint FROM cart_lines WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

pub async fn clear_cart(pool: &PgPool, user_id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM cart_lines WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Category, CreateCategoryRequest, UpdateCategoryRequest},
};

/// Find category by ID
pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

/// Find category by name
pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

/// Get all categories (flat list)
pub async fn get_all(pool: &PgPool) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
        .fetch_all(pool)
        .await?;

    Ok(categories)
}

/// Get categories for a specific product
pub async fn get_product_categories(pool: &PgPool, product_id: i32) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT c.* FROM categories c
         INNER JOIN product_categories pc ON c.id = pc.category_id
         WHERE pc.product_id = $1
         ORDER BY c.name ASC",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

pub async fn create_category(pool: &PgPool, req: CreateCategoryRequest) -> Result<Category> {
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name) VALUES ($1) RETURNING *",
    )
    .bind(&req.name)
    .fetch_one(pool)
    .await?;

    Ok(category)
}

pub async fn update_category(
    pool: &PgPool,
    id: i32,
    req: UpdateCategoryRequest,
) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        "UPDATE categories SET name = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(&req.name)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

pub async fn delete_category(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Replace a product's category associations
pub async fn assign_categories_to_product(
    pool: &PgPool,
    product_id: i32,
    category_ids: &[i32],
) -> Result<()> {
    sqlx::query("DELETE FROM product_categories WHERE product_id = $1")
        .bind(product_id)
        .execute(pool)
        .await?;

    if !category_ids.is_empty() {
        let mut query_builder =
            sqlx::QueryBuilder::new("INSERT INTO product_categories (product_id, category_id) ");

        query_builder.push_values(category_ids, |mut b, category_id| {
            b.push_bind(product_id).push_bind(category_id);
        });

        query_builder.build().execute(pool).await?;
    }

    Ok(())
}

use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Product, ProductImage},
};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

/// Storefront listing: in-stock products ordered by name.
pub async fn get_in_stock(pool: &PgPool) -> Result<Vec<Product>> {
    let products =
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE stock > 0 ORDER BY name ASC")
            .fetch_all(pool)
            .await?;

    Ok(products)
}

pub async fn find_images_by_product_id(pool: &PgPool, id: i32) -> Result<Vec<ProductImage>> {
    let product_images = sqlx::query_as::<_, ProductImage>(
        "SELECT * FROM product_images
         WHERE product_id = $1
         ORDER BY is_primary DESC, created_at ASC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(product_images)
}

pub async fn find_images_by_product_ids(
    pool: &PgPool,
    product_ids: &[i32],
) -> Result<HashMap<i32, Vec<ProductImage>>> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let all_images = sqlx::query_as::<_, ProductImage>(
        "SELECT * FROM product_images
         WHERE product_id = ANY($1)
         ORDER BY product_id, is_primary DESC, created_at ASC",
    )
    .bind(product_ids)
    .fetch_all(pool)
    .await?;

    let mut images_map: HashMap<i32, Vec<ProductImage>> = HashMap::new();
    for image in all_images {
        images_map.entry(image.product_id).or_default().push(image);
    }

    Ok(images_map)
}

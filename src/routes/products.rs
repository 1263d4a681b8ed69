use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::ProductResponse,
    queries::{category_queries, product_queries},
};

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    let products = product_queries::get_in_stock(&state.db).await?;

    let product_ids: Vec<i32> = products.iter().map(|p| p.id).collect();
    let mut images_map =
        product_queries::find_images_by_product_ids(&state.db, &product_ids).await?;

    let mut response = Vec::with_capacity(products.len());
    for product in products {
        let categories = category_queries::get_product_categories(&state.db, product.id).await?;
        let images = images_map.remove(&product.id).unwrap_or_default();
        response.push(ProductResponse {
            product,
            images,
            categories,
        });
    }

    Ok(Json(response))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>> {
    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Product not found".to_string()))?;

    let images = product_queries::find_images_by_product_id(&state.db, id).await?;
    let categories = category_queries::get_product_categories(&state.db, id).await?;

    Ok(Json(ProductResponse {
        product,
        images,
        categories,
    }))
}

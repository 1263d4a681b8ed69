use axum::{
    Json,
    extract::{Path, Query, State},
};

use http::StatusCode;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        AssignCategoriesRequest, Category, CreateCategoryRequest, ProductImageUrlResponse,
        ProductImageUrlRequest, ProductRequest, ProductResponse, ImageUploadUrl,
        UpdateCategoryRequest, UserProfile, UserQuery, UserRequest, UserSearchResponse,
    },
    queries::{admin_queries, category_queries, product_queries, user_queries},
    services::image_url_service::{
        self, delete_objects_by_prefix, delete_single_object, put_object_url,
    },
};

//PRODUCT ROUTES

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    if payload.name.is_none() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    if payload.price.is_none() {
        return Err(AppError::BadRequest("price is required".to_string()));
    }

    validate_amounts(payload.price, payload.stock)?;

    let product = admin_queries::create_product(&state.db, &payload).await?;
    let images = product_queries::find_images_by_product_id(&state.db, product.id).await?;
    let categories = category_queries::get_product_categories(&state.db, product.id).await?;

    Ok(Json(ProductResponse {
        product,
        images,
        categories,
    }))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    if product_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Product with id {} not found",
            id
        )));
    }

    validate_amounts(payload.price, payload.stock)?;

    let product = admin_queries::update_product(&state.db, id, &payload).await?;
    let images = product_queries::find_images_by_product_id(&state.db, product.id).await?;
    let categories = category_queries::get_product_categories(&state.db, product.id).await?;

    Ok(Json(ProductResponse {
        product,
        images,
        categories,
    }))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    if product_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    let s3_prefix = format!(
        "{}/{}/",
        image_url_service::storage_prefix("products", state.environment),
        id
    );

    delete_objects_by_prefix(&state.s3_client, &state.s3_bucket, &s3_prefix)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to delete images from S3: {}", e)))?;

    admin_queries::delete_product(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn generate_product_urls(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductImageUrlRequest>,
) -> Result<Json<ProductImageUrlResponse>> {
    if product_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Product with id {} not found",
            id
        )));
    }

    let mut responses = Vec::new();

    for req in payload.images {
        let image_uuid = Uuid::new_v4();
        let extension = image_url_service::extension_for(&req.content_type);

        let key =
            image_url_service::object_key("products", state.environment, id, image_uuid, extension);

        let upload_url = put_object_url(
            &state.s3_client,
            &state.s3_bucket,
            &key,
            &req.content_type,
            900,
        )
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to generate presigned URL: {}", e)))?;

        admin_queries::add_product_image(&state.db, id, image_uuid, extension, req.is_primary)
            .await?;

        responses.push(ImageUploadUrl {
            image_uuid,
            upload_url,
            public_url: image_url_service::public_url(&state.assets_url, &key),
        });
    }

    Ok(Json(ProductImageUrlResponse { images: responses }))
}

pub async fn delete_product_image(
    State(state): State<AppState>,
    Path((product_id, image_uuid)): Path<(i32, Uuid)>,
) -> Result<StatusCode> {
    let deleted_image = admin_queries::delete_product_image(&state.db, product_id, image_uuid)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Image {} not found for product {}",
                image_uuid, product_id
            ))
        })?;

    let key = image_url_service::object_key(
        "products",
        state.environment,
        product_id,
        deleted_image.image_uuid,
        &deleted_image.extension,
    );

    delete_single_object(&state.s3_client, &state.s3_bucket, &key)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to delete image from S3: {}", e)))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn assign_categories_to_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    Json(payload): Json<AssignCategoriesRequest>,
) -> Result<StatusCode> {
    if product_queries::find_by_id(&state.db, product_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "Product with id {} not found",
            product_id
        )));
    }

    for category_id in &payload.category_ids {
        if category_queries::find_by_id(&state.db, *category_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                category_id
            )));
        }
    }

    category_queries::assign_categories_to_product(&state.db, product_id, &payload.category_ids)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

fn validate_amounts(price: Option<Decimal>, stock: Option<Decimal>) -> Result<()> {
    if price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(AppError::BadRequest("price cannot be negative".to_string()));
    }

    if stock.is_some_and(|s| s < Decimal::ZERO) {
        return Err(AppError::BadRequest("stock cannot be negative".to_string()));
    }

    Ok(())
}

//CATEGORY ROUTES

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Category>> {
    let category = category_queries::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound(format!(
            "Category with id {} not found",
            id
        )))?;

    Ok(Json(category))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<Json<Category>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    // duplicate names are rejected before hitting the unique index
    if category_queries::find_by_name(&state.db, &payload.name)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "Category '{}' already exists",
            payload.name
        )));
    }

    let category = category_queries::create_category(&state.db, payload).await?;

    Ok(Json(category))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    if let Some(existing) = category_queries::find_by_name(&state.db, &payload.name).await? {
        if existing.id != id {
            return Err(AppError::Conflict(format!(
                "Another category named '{}' already exists",
                payload.name
            )));
        }
    }

    let category = category_queries::update_category(&state.db, id, payload)
        .await?
        .ok_or(AppError::NotFound(format!(
            "Category with id {} not found",
            id
        )))?;

    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    if category_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Category with id {} not found",
            id
        )));
    }

    category_queries::delete_category(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

//USER ROUTES

pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<UserSearchResponse>> {
    let response = admin_queries::search_users(&state.db, params).await?;

    Ok(Json(response))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UserRequest>,
) -> Result<Json<UserProfile>> {
    if user_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound(format!("User with id {} not found", id)));
    }

    let user = admin_queries::update_user(&state.db, id, &payload).await?;

    Ok(Json(user))
}

pub async fn delete_user(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    if user_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound(format!("User with id {} not found", id)));
    }

    admin_queries::delete_user(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        AddToCartRequest, CartCountResponse, CartLine, CartLineResponse, CartLineView,
        CartResponse, CheckoutResponse, EditCartLineRequest, cart, order,
    },
    queries::{cart_queries, product_queries, user_queries},
    services::{image_url_service, order_service},
    utils::extractors::extract_user_id,
    utils::jwt::Claims,
};

pub async fn get_cart(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<CartResponse>> {
    let user_id = extract_user_id(&claims)?;
    let lines = cart_queries::get_cart_lines(&state.db, user_id).await?;

    Ok(Json(build_cart_response(&state, lines)))
}

pub async fn cart_count(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<CartCountResponse>> {
    let user_id = extract_user_id(&claims)?;
    let quantity = cart_queries::count_quantity(&state.db, user_id).await?;

    Ok(Json(CartCountResponse { quantity }))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartLine>)> {
    let user_id = extract_user_id(&claims)?;

    let quantity = payload.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(AppError::BadRequest(
            "Quantity must be a positive integer".to_string(),
        ));
    }

    if product_queries::find_by_id(&state.db, payload.product_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "Product {} not found",
            payload.product_id
        )));
    }

    // A new line every time, even for a product already in the cart
    let line = cart_queries::add_line(
        &state.db,
        user_id,
        payload.product_id,
        quantity,
        payload.remarks.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(line)))
}

pub async fn increase_quantity(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(line_id): Path<i32>,
) -> Result<Json<CartLine>> {
    let user_id = extract_user_id(&claims)?;

    let line = cart_queries::increase_quantity(&state.db, user_id, line_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart line not found".to_string()))?;

    Ok(Json(line))
}

pub async fn decrease_quantity(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(line_id): Path<i32>,
) -> Result<Json<CartLine>> {
    let user_id = extract_user_id(&claims)?;

    let line = cart_queries::decrease_quantity(&state.db, user_id, line_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart line not found".to_string()))?;

    Ok(Json(line))
}

pub async fn edit_line(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(line_id): Path<i32>,
    Json(payload): Json<EditCartLineRequest>,
) -> Result<Json<CartLine>> {
    let user_id = extract_user_id(&claims)?;

    if payload.quantity < 1 {
        return Err(AppError::BadRequest(
            "Quantity must be a positive integer".to_string(),
        ));
    }

    let line = cart_queries::edit_line(
        &state.db,
        user_id,
        line_id,
        payload.quantity,
        payload.remarks.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Cart line not found".to_string()))?;

    Ok(Json(line))
}

pub async fn remove_line(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(line_id): Path<i32>,
) -> Result<StatusCode> {
    let user_id = extract_user_id(&claims)?;

    if !cart_queries::delete_line(&state.db, user_id, line_id).await? {
        return Err(AppError::NotFound("Cart line not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn checkout(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<CheckoutResponse>> {
    let user_id = extract_user_id(&claims)?;

    let profile = user_queries::get_profile(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // The snapshot is re-derived from the store, never taken from the client
    let lines = cart_queries::get_cart_lines(&state.db, user_id).await?;
    let submission = order::build_submission(&profile, &lines)?;

    let outcome = order_service::process_order(&state.orders_url, &submission).await?;

    if !outcome.clears_cart() {
        // Cart stays intact so the user can retry
        return Err(AppError::CollaboratorError(outcome.message));
    }

    cart_queries::clear_cart(&state.db, user_id).await?;

    tracing::info!(
        "Order placed for user {} ({} lines), ref {:?}",
        user_id,
        submission.lines.len(),
        outcome.order_ref
    );

    Ok(Json(CheckoutResponse {
        order_ref: outcome.order_ref,
        message: outcome.message,
    }))
}

fn build_cart_response(state: &AppState, lines: Vec<CartLineView>) -> CartResponse {
    let total_quantity = cart::total_quantity(&lines);
    let total_amount = cart::total_amount(&lines);

    let response_lines = lines
        .into_iter()
        .map(|line| {
            let image_url = match (line.image_uuid, line.image_extension.as_deref()) {
                (Some(uuid), Some(extension)) => {
                    let key = image_url_service::object_key(
                        "products",
                        state.environment,
                        line.product_id,
                        uuid,
                        extension,
                    );
                    Some(image_url_service::public_url(&state.assets_url, &key))
                }
                _ => None,
            };

            CartLineResponse {
                line_total: line.line_total(),
                id: line.id,
                product_id: line.product_id,
                product_name: line.product_name,
                unit_price: line.unit_price,
                quantity: line.quantity,
                remarks: line.remarks,
                image_url,
            }
        })
        .collect();

    CartResponse {
        lines: response_lines,
        total_quantity,
        total_amount,
    }
}

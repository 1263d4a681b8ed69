use axum::{Extension, Json, extract::State, http::StatusCode};
use rand::Rng;
use uuid::Uuid;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        ImageUploadUrl, PasswordResetConfirm, PasswordResetRequest, SendVerificationCodeRequest,
        UpdateProfileRequest, UserProfile, VerifyCodeRequest,
    },
    queries::{email_queries, user_queries},
    services::{email_service, image_url_service},
    utils::extractors::extract_user_id,
    utils::jwt::Claims,
};

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserProfile>> {
    let user_id = extract_user_id(&claims)?;

    let profile = user_queries::get_profile(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>> {
    let user_id = extract_user_id(&claims)?;

    user_queries::update_profile(&state.db, user_id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let profile = user_queries::get_profile(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(profile))
}

#[derive(serde::Deserialize)]
pub struct AvatarUploadRequest {
    pub content_type: String,
}

pub async fn generate_image_url(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AvatarUploadRequest>,
) -> Result<Json<ImageUploadUrl>> {
    let user_id = extract_user_id(&claims)?;

    let image_uuid = Uuid::new_v4();
    let extension = image_url_service::extension_for(&payload.content_type);
    let key = image_url_service::object_key(
        "users",
        state.environment,
        user_id,
        image_uuid,
        extension,
    );

    let upload_url = image_url_service::put_object_url(
        &state.s3_client,
        &state.s3_bucket,
        &key,
        &payload.content_type,
        900,
    )
    .await
    .map_err(|e| AppError::InternalError(format!("Failed to generate presigned URL: {}", e)))?;

    user_queries::set_image(&state.db, user_id, image_uuid).await?;

    Ok(Json(ImageUploadUrl {
        image_uuid,
        upload_url,
        public_url: image_url_service::public_url(&state.assets_url, &key),
    }))
}

pub async fn send_verification_code(
    State(state): State<AppState>,
    Json(payload): Json<SendVerificationCodeRequest>,
) -> Result<StatusCode> {
    validate_email(&payload.email)?;

    let code = rand::rng().random_range(100000..999999);

    email_queries::delete_codes_for_email(&state.db, &payload.email, email_queries::PURPOSE_EMAIL)
        .await?;

    email_queries::create_verification_code(
        &state.db,
        &payload.email,
        code,
        email_queries::PURPOSE_EMAIL,
    )
    .await?;

    email_service::send_verification_email(
        &state.ses_client,
        &payload.email,
        code,
        &state.sender_email,
    )
    .await?;

    tracing::info!("Verification code sent to {}", payload.email);

    Ok(StatusCode::OK)
}

pub async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyCodeRequest>,
) -> Result<StatusCode> {
    let verification = email_queries::find_valid_code(
        &state.db,
        &payload.email,
        payload.code,
        email_queries::PURPOSE_EMAIL,
    )
    .await?
    .ok_or_else(|| AppError::Unauthorized("Invalid or expired verification code".to_string()))?;

    email_queries::delete_code(&state.db, verification.id).await?;
    user_queries::mark_email_verified(&state.db, &payload.email).await?;

    tracing::info!("Email verified for {}", payload.email);

    Ok(StatusCode::OK)
}

pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<PasswordResetRequest>,
) -> Result<StatusCode> {
    validate_email(&payload.email)?;

    // Do not leak whether the email is registered
    if user_queries::find_by_email(&state.db, &payload.email)
        .await?
        .is_none()
    {
        return Ok(StatusCode::OK);
    }

    let code = rand::rng().random_range(100000..999999);

    email_queries::delete_codes_for_email(
        &state.db,
        &payload.email,
        email_queries::PURPOSE_PASSWORD_RESET,
    )
    .await?;

    email_queries::create_verification_code(
        &state.db,
        &payload.email,
        code,
        email_queries::PURPOSE_PASSWORD_RESET,
    )
    .await?;

    email_service::send_password_reset_email(
        &state.ses_client,
        &payload.email,
        code,
        &state.sender_email,
    )
    .await?;

    tracing::info!("Password reset code sent to {}", payload.email);

    Ok(StatusCode::OK)
}

pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<PasswordResetConfirm>,
) -> Result<StatusCode> {
    if payload.new_password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let verification = email_queries::find_valid_code(
        &state.db,
        &payload.email,
        payload.code,
        email_queries::PURPOSE_PASSWORD_RESET,
    )
    .await?
    .ok_or_else(|| AppError::Unauthorized("Invalid or expired reset code".to_string()))?;

    let password_hash = bcrypt::hash(&payload.new_password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

    email_queries::delete_code(&state.db, verification.id).await?;

    if !user_queries::set_password(&state.db, &payload.email, &password_hash).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    tracing::info!("Password reset for {}", payload.email);

    Ok(StatusCode::OK)
}

fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    Ok(())
}

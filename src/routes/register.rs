use axum::{Json, extract::State, http::StatusCode};
use rand::Rng;

use crate::{
    AppState,
    error::{AppError, Result},
    models::RegisterRequest,
    queries::{email_queries, user_queries},
    services::email_service,
};

pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<StatusCode> {
    validate_registration(&payload)?;

    if user_queries::find_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

    let user = user_queries::create_user(&state.db, &payload, &password_hash).await?;

    // Login stays blocked until the emailed code is confirmed
    let code = rand::rng().random_range(100000..999999);
    email_queries::create_verification_code(
        &state.db,
        &user.email,
        code,
        email_queries::PURPOSE_EMAIL,
    )
    .await?;

    email_service::send_verification_email(
        &state.ses_client,
        &user.email,
        code,
        &state.sender_email,
    )
    .await?;

    tracing::info!("Registered user {}, verification code sent", user.email);

    Ok(StatusCode::CREATED)
}

fn validate_registration(payload: &RegisterRequest) -> Result<()> {
    if payload.email.is_empty() || !payload.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(AppError::BadRequest("Name cannot be empty".to_string()));
    }

    if payload.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            email: "lucy@example.com".to_string(),
            first_name: "Lucy".to_string(),
            last_name: "Macias".to_string(),
            password: "long-enough".to_string(),
            document: None,
            address: None,
            phone_number: None,
            city_id: None,
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(validate_registration(&request()).is_ok());
    }

    #[test]
    fn bad_email_and_short_password_are_rejected() {
        let mut bad_email = request();
        bad_email.email = "not-an-email".to_string();
        assert!(validate_registration(&bad_email).is_err());

        let mut short_password = request();
        short_password.password = "short".to_string();
        assert!(validate_registration(&short_password).is_err());
    }
}

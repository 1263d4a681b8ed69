use aws_sdk_sesv2::Client as SesClient;

use crate::error::{AppError, Result};

pub async fn send_verification_email(
    ses_client: &SesClient,
    recipient: &str,
    code: i32,
    sender_email: &str,
) -> Result<()> {
    send_code_email(ses_client, recipient, code, sender_email, "Verify Your Email").await
}

pub async fn send_password_reset_email(
    ses_client: &SesClient,
    recipient: &str,
    code: i32,
    sender_email: &str,
) -> Result<()> {
    send_code_email(ses_client, recipient, code, sender_email, "Reset Your Password").await
}

async fn send_code_email(
    ses_client: &SesClient,
    recipient: &str,
    code: i32,
    sender_email: &str,
    subject_text: &str,
) -> Result<()> {
    let html_template = include_str!("../utils/code.html");
    let html = html_template.replace("{{verification_code}}", &code.to_string());

    let destination = aws_sdk_sesv2::types::Destination::builder()
        .to_addresses(recipient)
        .build();

    let subject = aws_sdk_sesv2::types::Content::builder()
        .data(subject_text)
        .charset("UTF-8")
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build subject: {}", e)))?;

    let html_body = aws_sdk_sesv2::types::Content::builder()
        .data(html)
        .charset("UTF-8")
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTML body: {}", e)))?;

    let body = aws_sdk_sesv2::types::Body::builder().html(html_body).build();

    let message = aws_sdk_sesv2::types::Message::builder()
        .subject(subject)
        .body(body)
        .build();

    let content = aws_sdk_sesv2::types::EmailContent::builder()
        .simple(message)
        .build();

    ses_client
        .send_email()
        .from_email_address(sender_email)
        .destination(destination)
        .content(content)
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Failed to send email: {:?}", e);
            AppError::InternalError("Failed to send verification email".to_string())
        })?;

    Ok(())
}

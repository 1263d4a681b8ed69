use crate::{
    error::{AppError, Result},
    models::{OrderSubmission, ProcessOrderOutcome},
};

pub fn build_order_payload(submission: &OrderSubmission) -> serde_json::Value {
    serde_json::json!({ "order": submission })
}

/// Maps the service's response body onto a verdict. A well-formed failure
/// keeps its message intact for the caller; a malformed body is an error.
pub fn parse_verdict(body: &serde_json::Value) -> Result<ProcessOrderOutcome> {
    let response = body
        .get("response")
        .ok_or_else(|| AppError::InternalError("Invalid order service response".to_string()))?;

    let success = response
        .get("success")
        .and_then(|v| v.as_bool())
        .ok_or_else(|| {
            AppError::InternalError("Order service response missing success flag".to_string())
        })?;

    let message = response
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    let order_ref = response
        .get("order_ref")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    Ok(ProcessOrderOutcome {
        success,
        message,
        order_ref,
    })
}

/// Hands the submission to the order-processing service and awaits its
/// verdict. One synchronous call per checkout attempt, no retry.
pub async fn process_order(
    base_url: &str,
    submission: &OrderSubmission,
) -> Result<ProcessOrderOutcome> {
    let request_body = build_order_payload(submission);

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/orders", base_url))
        .json(&request_body)
        .send()
        .await
        .map_err(|e| AppError::CollaboratorError(format!("Order service unreachable: {}", e)))?;

    let body: serde_json::Value = response.json().await.map_err(|e| {
        AppError::InternalError(format!("Failed to parse order service response: {}", e))
    })?;

    parse_verdict(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;
    use serde_json::json;

    use crate::models::SubmissionLine;

    fn submission() -> OrderSubmission {
        OrderSubmission {
            user_id: 3,
            email: "joss@example.com".to_string(),
            name: "Joss Martinez".to_string(),
            address: None,
            lines: vec![SubmissionLine {
                product_id: 5,
                product_name: "iPad".to_string(),
                unit_price: dec!(23000),
                quantity: 1,
                remarks: None,
            }],
            total_quantity: 1,
            total_amount: dec!(23000),
        }
    }

    #[test]
    fn payload_wraps_the_submission() {
        let payload = build_order_payload(&submission());

        assert_eq!(payload["order"]["user_id"], 3);
        assert_eq!(payload["order"]["lines"][0]["product_name"], "iPad");
        assert_eq!(payload["order"]["total_quantity"], 1);
    }

    #[test]
    fn success_verdict_carries_order_ref() {
        let body = json!({
            "response": { "success": true, "message": "ok", "order_ref": "ord_123" }
        });

        let outcome = parse_verdict(&body).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.order_ref.as_deref(), Some("ord_123"));
    }

    #[test]
    fn failure_message_is_passed_through_verbatim() {
        let body = json!({
            "response": { "success": false, "message": "payment declined: card expired" }
        });

        let outcome = parse_verdict(&body).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message, "payment declined: card expired");
        assert!(outcome.order_ref.is_none());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_verdict(&json!({ "unexpected": true })).is_err());
        assert!(parse_verdict(&json!({ "response": { "message": "no flag" } })).is_err());
    }
}

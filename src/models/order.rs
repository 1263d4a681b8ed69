use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    models::{CartLineView, UserProfile, cart},
};

/// Snapshot of a user's cart handed to the order-processing service.
/// Built server-side from the stored lines, never from client input.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSubmission {
    pub user_id: i32,
    pub email: String,
    pub name: String,
    pub address: Option<String>,
    pub lines: Vec<SubmissionLine>,
    pub total_quantity: i64,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionLine {
    pub product_id: i32,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub remarks: Option<String>,
}

pub fn build_submission(user: &UserProfile, lines: &[CartLineView]) -> Result<OrderSubmission> {
    if lines.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    Ok(OrderSubmission {
        user_id: user.id,
        email: user.email.clone(),
        name: format!("{} {}", user.first_name, user.last_name),
        address: user.address.clone(),
        total_quantity: cart::total_quantity(lines),
        total_amount: cart::total_amount(lines),
        lines: lines
            .iter()
            .map(|line| SubmissionLine {
                product_id: line.product_id,
                product_name: line.product_name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                remarks: line.remarks.clone(),
            })
            .collect(),
    })
}

/// Verdict returned by the order-processing service.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessOrderOutcome {
    pub success: bool,
    pub message: String,
    pub order_ref: Option<String>,
}

impl ProcessOrderOutcome {
    /// Clearing the cart is owned by this service, not the order processor,
    /// and happens exactly when the processor accepts the order.
    pub fn clears_cart(&self) -> bool {
        self.success
    }
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_ref: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::dec;

    use crate::models::UserRole;

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            email: "lucy@example.com".to_string(),
            first_name: "Lucy".to_string(),
            last_name: "Macias".to_string(),
            document: None,
            address: Some("Calle Negrete #467".to_string()),
            phone_number: None,
            image_uuid: None,
            role: UserRole::User,
            city_id: None,
            city_name: None,
            state_name: None,
            country_name: None,
            created_at: Utc::now(),
        }
    }

    fn view(id: i32, product_id: i32, price: Decimal, quantity: i32) -> CartLineView {
        CartLineView {
            id,
            product_id,
            product_name: format!("product-{}", product_id),
            unit_price: price,
            quantity,
            remarks: Some("gift wrap".to_string()),
            image_uuid: None,
            image_extension: None,
        }
    }

    #[test]
    fn empty_cart_is_rejected_before_submission() {
        let err = build_submission(&profile(), &[]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn cart_is_cleared_only_on_accepted_orders() {
        let accepted = ProcessOrderOutcome {
            success: true,
            message: "ok".to_string(),
            order_ref: Some("ord_1".to_string()),
        };
        let rejected = ProcessOrderOutcome {
            success: false,
            message: "payment declined".to_string(),
            order_ref: None,
        };

        assert!(accepted.clears_cart());
        assert!(!rejected.clears_cart());
    }

    #[test]
    fn submission_carries_lines_and_totals() {
        let lines = vec![view(1, 10, dec!(100), 1), view(2, 10, dec!(100), 1)];
        let submission = build_submission(&profile(), &lines).unwrap();

        assert_eq!(submission.user_id, 1);
        assert_eq!(submission.name, "Lucy Macias");
        assert_eq!(submission.lines.len(), 2);
        assert_eq!(submission.total_quantity, 2);
        assert_eq!(submission.total_amount, dec!(200));
        assert_eq!(submission.lines[0].remarks.as_deref(), Some("gift wrap"));
    }
}

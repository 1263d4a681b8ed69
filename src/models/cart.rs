use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CartLine {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cart line joined with the current product name, price and primary image.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartLineView {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub remarks: Option<String>,
    pub image_uuid: Option<Uuid>,
    pub image_extension: Option<String>,
}

impl CartLineView {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

pub fn total_quantity(lines: &[CartLineView]) -> i64 {
    lines.iter().map(|line| line.quantity as i64).sum()
}

pub fn total_amount(lines: &[CartLineView]) -> Decimal {
    lines.iter().map(|line| line.line_total()).sum()
}

// Request types

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: i32,
    pub quantity: Option<i32>,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditCartLineRequest {
    pub quantity: i32,
    pub remarks: Option<String>,
}

// Response types

#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub remarks: Option<String>,
    pub image_url: Option<String>,
    pub line_total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub total_quantity: i64,
    pub total_amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CartCountResponse {
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn line(id: i32, product_id: i32, price: Decimal, quantity: i32) -> CartLineView {
        CartLineView {
            id,
            product_id,
            product_name: format!("product-{}", product_id),
            unit_price: price,
            quantity,
            remarks: None,
            image_uuid: None,
            image_extension: None,
        }
    }

    #[test]
    fn repeated_product_stays_on_distinct_lines() {
        // Adding the same product twice produces two lines, each qty 1
        let lines = vec![line(1, 10, dec!(100), 1), line(2, 10, dec!(100), 1)];

        assert_eq!(lines.len(), 2);
        assert_eq!(total_quantity(&lines), 2);
        assert_eq!(total_amount(&lines), dec!(200));
    }

    #[test]
    fn totals_sum_across_lines() {
        let lines = vec![line(1, 1, dec!(25.50), 2), line(2, 2, dec!(10), 3)];

        assert_eq!(total_quantity(&lines), 5);
        assert_eq!(total_amount(&lines), dec!(81.00));
    }

    #[test]
    fn empty_cart_has_zero_totals() {
        assert_eq!(total_quantity(&[]), 0);
        assert_eq!(total_amount(&[]), Decimal::ZERO);
    }
}

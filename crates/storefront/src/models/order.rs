//! Orders and their totals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tindahan_core::{OrderId, OrderStatus, PaymentMethod, PaymentStatus, UserId};

use super::line_item::LineItem;
use super::ModelError;

/// Checkout contact and delivery details, validated before any order is
/// created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub full_name: String,
    pub phone: String,
    pub address_line: String,
    pub city: String,
    pub province: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// An order's totals breakdown.
///
/// Derived, never persisted on its own - always recomputed from line items
/// and payment method, then frozen into the order it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub service_fee: Decimal,
    pub total: Decimal,
}

/// A submitted order.
///
/// Created exactly once at checkout submission; `status` is mutated only by
/// the admin panel afterwards, and line items are immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub line_items: Vec<LineItem>,
    pub customer: CustomerInfo,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub totals: Totals,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Parse an order from a remote document.
    ///
    /// Orders are only ever written by this crate, so parsing is strict: a
    /// document that does not match the schema is rejected rather than
    /// patched up.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Schema` if the document does not deserialize.
    pub fn from_document(doc: Value) -> Result<Self, ModelError> {
        Ok(serde_json::from_value(doc)?)
    }

    /// Serialize the order to its remote document shape.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Schema` if serialization fails.
    pub fn to_document(&self) -> Result<Value, ModelError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// An order plus where the confirmation view found it.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub order: Order,
    /// Which provider answered: "session", "local", or "remote".
    pub source: &'static str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use tindahan_core::{Price, ProductId};

    fn sample_order() -> Order {
        Order {
            order_id: OrderId::new("TDN-1756252800-k3x9qa"),
            user_id: UserId::new("u-1"),
            line_items: vec![LineItem {
                product_id: ProductId::new("p-1"),
                name: "Plain Tee".to_owned(),
                brand: "Uniqlo".to_owned(),
                unit_price: Price::parse("170").unwrap(),
                quantity: 2,
                size: "M".to_owned(),
                image: None,
            }],
            customer: CustomerInfo {
                full_name: "Maria Santos".to_owned(),
                phone: "09171234567".to_owned(),
                address_line: "123 Rizal St".to_owned(),
                city: "Quezon City".to_owned(),
                province: "Metro Manila".to_owned(),
                postal_code: Some("1100".to_owned()),
                notes: None,
            },
            payment_method: PaymentMethod::CashOnDelivery,
            payment_status: PaymentStatus::Unpaid,
            totals: Totals {
                subtotal: Decimal::new(340, 0),
                shipping: Decimal::new(150, 0),
                service_fee: Decimal::new(50, 0),
                total: Decimal::new(540, 0),
            },
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_document_round_trip_preserves_totals() {
        let order = sample_order();
        let doc = order.to_document().unwrap();
        let back = Order::from_document(doc).unwrap();
        assert_eq!(back.totals, order.totals);
        assert_eq!(back, order);
    }

    #[test]
    fn test_malformed_document_rejected() {
        let doc = json!({"orderId": "TDN-1-x", "userId": "u-1"});
        assert!(matches!(
            Order::from_document(doc),
            Err(ModelError::Schema(_))
        ));
    }

    #[test]
    fn test_document_uses_camel_case_keys() {
        let doc = sample_order().to_document().unwrap();
        assert!(doc.get("orderId").is_some());
        assert!(doc.get("lineItems").is_some());
        assert!(doc.get("paymentMethod").is_some());
        assert!(doc.get("createdAt").is_some());
    }
}

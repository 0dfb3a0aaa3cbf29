// src/models/order.rs
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{string_or_number, Resource};
use crate::error::Error;

/// Lifecycle of an order. The backend speaks the lowercase tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Label shown to French-speaking shop staff
    pub fn label_fr(&self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Processing => "En cours",
            Self::Shipped => "Expédié",
            Self::Delivered => "Livré",
            Self::Cancelled => "Annulé",
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| {
                Error::validation(
                    "status",
                    format!(
                        "unknown order status '{}' (expected one of pending, processing, shipped, delivered, cancelled)",
                        value
                    ),
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(deserialize_with = "string_or_number")]
    pub product_id: String,
    #[serde(alias = "name")]
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    pub total: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl Order {
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

impl Resource for Order {
    const PATH: &'static str = "/orders";
    const NAME: &'static str = "order";
    type Input = OrderUpdate;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Partial order update sent to `PUT /orders/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

/// Body of `PUT /orders/{id}/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert_eq!(" Cancelled ".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert!("En attente".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let body = serde_json::to_string(&StatusChange { status: OrderStatus::Shipped }).unwrap();
        assert_eq!(body, r#"{"status":"shipped"}"#);
        assert_eq!(OrderStatus::Processing.label_fr(), "En cours");
        assert!(OrderStatus::Delivered.is_final());
        assert!(!OrderStatus::Pending.is_final());
    }

    #[test]
    fn test_order_decoding() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": "ORD-001",
            "customerName": "Jean Dupont",
            "customerEmail": "jean.dupont@email.com",
            "total": 89.99,
            "status": "processing",
            "items": [
                {"productId": 1, "productName": "T-shirt Premium", "quantity": 2, "price": 29.99},
                {"productId": "2", "name": "Casque Audio Pro", "quantity": 1, "price": 30.01}
            ],
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.items[0].product_id, "1");
        assert_eq!(order.items[1].product_name, "Casque Audio Pro");
        assert_eq!(order.item_count(), 3);
        assert!((order.items[0].line_total() - 59.98).abs() < 1e-9);
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = OrderUpdate {
            status: Some(OrderStatus::Delivered),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"status":"delivered"}"#);
    }
}

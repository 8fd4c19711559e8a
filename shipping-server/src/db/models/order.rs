//! Order Model
//!
//! Only the slice this service reads and writes. The full order (items,
//! address, payment state) belongs to the storefront's order management.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::OrderSummary;
use surrealdb::sql::Thing;

pub type OrderId = Thing;

/// Order row matching the SurrealDB table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    #[serde(default = "default_status")]
    pub order_status: String,
    #[serde(default)]
    pub cart_total: Decimal,
    pub tracking_carrier: Option<String>,
    pub tracking_code: Option<String>,
    pub created_at: Option<String>,
}

fn default_status() -> String {
    "Not Process".to_string()
}

/// Order for creation (without id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub order_status: Option<String>,
    pub cart_total: Option<Decimal>,
}

/// Shipping fields written by the admin update endpoint
///
/// Both fields are always written, `None` clearing the stored value -
/// submitting an empty update resets the shipping info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderShippingPatch {
    pub tracking_carrier: Option<String>,
    pub tracking_code: Option<String>,
}

impl From<Order> for OrderSummary {
    fn from(order: Order) -> Self {
        OrderSummary {
            id: order.id.map(|t| t.to_string()).unwrap_or_default(),
            created_at: order.created_at,
            cart_total: order.cart_total,
            order_status: order.order_status,
            tracking_carrier: order.tracking_carrier,
            tracking_code: order.tracking_code,
        }
    }
}

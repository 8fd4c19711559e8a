//! Order Models
//!
//! Only the slice of an order this service touches: shipping fields and
//! the summary returned by the public tracking lookup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order summary returned by GET /api/shipping/lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: String,
    pub created_at: Option<String>,
    pub cart_total: Decimal,
    pub order_status: String,
    pub tracking_carrier: Option<String>,
    pub tracking_code: Option<String>,
}

/// Payload for PUT /api/orders/shipping
///
/// Accepts both the short field names and the legacy camelCase ones the
/// storefront admin UI sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateShippingRequest {
    #[serde(alias = "orderId")]
    pub order_id: String,
    #[serde(default, alias = "trackingCarrier")]
    pub carrier: Option<String>,
    #[serde(default, alias = "trackingCode")]
    pub tracking: Option<String>,
}

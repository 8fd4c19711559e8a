//! Shipping Lookup Handlers
//!
//! Public endpoint: customers paste a tracking code and get back the
//! matching order plus, when a provider can be guessed, its events.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::tracking::Provider;
use crate::utils::{AppError, AppResult};
use shared::models::{OrderSummary, TrackingEvent};

#[derive(Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    tracking: Option<String>,
    /// Legacy query name still sent by older storefront builds
    #[serde(default, rename = "trackingNumber")]
    tracking_number: Option<String>,
}

/// GET /api/shipping/lookup 响应
#[derive(Serialize)]
pub struct OrderLookupResponse {
    pub ok: bool,
    pub order: OrderSummary,
    pub events: Option<Vec<TrackingEvent>>,
}

/// GET /api/shipping/lookup?tracking=... - 按运单号查询订单
pub async fn lookup_by_tracking(
    State(state): State<ServerState>,
    Query(query): Query<LookupQuery>,
) -> AppResult<Json<OrderLookupResponse>> {
    let tracking = query
        .tracking
        .or(query.tracking_number)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::validation("tracking query required"))?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_tracking(&tracking)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::not_found("ไม่พบคำสั่งซื้อสำหรับรหัสติดตามนี้"))?;

    // Prefer the persisted carrier; fall back to guessing from the code
    // shape for orders that predate carrier persistence
    let provider = order
        .tracking_carrier
        .as_deref()
        .and_then(Provider::normalize)
        .or_else(|| Provider::guess_from_code(&tracking));

    let events = match provider {
        Some(provider) => state.lookup.try_track_events(provider, &tracking).await,
        None => None,
    };

    let mut summary: OrderSummary = order.into();
    if summary.tracking_carrier.is_none() {
        summary.tracking_carrier = provider.map(|p| p.canonical_name().to_string());
    }

    Ok(Json(OrderLookupResponse {
        ok: true,
        order: summary,
        events,
    }))
}

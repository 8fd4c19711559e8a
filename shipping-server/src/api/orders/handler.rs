//! Order Shipping Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::OrderShippingPatch;
use crate::db::repository::{OrderRepository, RepoError};
use crate::tracking::carriers;
use crate::utils::{AppError, AppResult};
use shared::models::{OrderSummary, UpdateShippingRequest};

/// PUT /api/orders/shipping 响应
#[derive(Serialize)]
pub struct UpdateShippingResponse {
    pub message: String,
    pub order: OrderSummary,
}

/// PUT /api/orders/shipping - 更新订单物流信息
///
/// Carrier and tracking are validated against the rule table before
/// anything is written; both stored fields are overwritten, so an empty
/// update clears the shipping info.
pub async fn update_shipping(
    State(state): State<ServerState>,
    Json(payload): Json<UpdateShippingRequest>,
) -> AppResult<Json<UpdateShippingResponse>> {
    let carrier = payload.carrier.filter(|c| !c.trim().is_empty());
    let tracking = payload.tracking.filter(|t| !t.trim().is_empty());

    if let Some(carrier) = carrier.as_deref() {
        carriers::validate(carrier, tracking.as_deref())?;
    }

    let repo = OrderRepository::new(state.db.clone());

    // Order reads failing means the store itself is unreachable, which the
    // caller should see as 503, not a generic 500
    let existing = repo
        .find_by_id(&payload.order_id)
        .await
        .map_err(|e| AppError::persistence_unavailable(e.to_string()))?;
    if existing.is_none() {
        return Err(AppError::not_found(format!(
            "Order {} not found",
            payload.order_id
        )));
    }

    let updated = repo
        .update_shipping(
            &payload.order_id,
            OrderShippingPatch {
                tracking_carrier: carrier,
                tracking_code: tracking,
            },
        )
        .await
        .map_err(|e| match e {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Database(msg) => AppError::persistence_unavailable(msg),
        })?;

    Ok(Json(UpdateShippingResponse {
        message: "บันทึกข้อมูลการจัดส่งสำเร็จ".to_string(),
        order: updated.into(),
    }))
}

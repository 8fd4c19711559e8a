//! Tracking API Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::TrackingSequenceRepository;
use crate::tracking::{CodeFormat, Provider, carriers, generator};
use crate::utils::{AppError, AppResult};
use shared::models::{CarrierFormat, GenerateTrackingRequest, TrackLookup, TrackRequest};

/// POST /api/tracking/generate 响应
#[derive(Serialize)]
pub struct GenerateResponse {
    pub ok: bool,
    pub code: String,
    pub key: String,
    pub counter: i64,
}

/// POST /api/tracking/generate - 生成运单号
pub async fn generate(
    State(state): State<ServerState>,
    Json(payload): Json<GenerateTrackingRequest>,
) -> AppResult<Json<GenerateResponse>> {
    let format: CodeFormat = payload
        .format
        .as_deref()
        .ok_or_else(|| AppError::validation("format is required"))?
        .parse()?;

    let repo = TrackingSequenceRepository::new(state.db.clone());
    let generated = generator::generate(&repo, format, payload.branch.as_deref()).await;

    Ok(Json(GenerateResponse {
        ok: true,
        code: generated.code,
        key: generated.key,
        counter: generated.counter,
    }))
}

/// GET /api/tracking/formats 响应
#[derive(Serialize)]
pub struct FormatsResponse {
    pub ok: bool,
    pub formats: Vec<CarrierFormat>,
}

/// GET /api/tracking/formats - 物流商运单号格式表
pub async fn formats() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        ok: true,
        formats: carriers::formats(),
    })
}

/// POST /api/tracking/track - 查询物流商追踪事件
pub async fn track(
    State(state): State<ServerState>,
    Json(payload): Json<TrackRequest>,
) -> AppResult<Json<TrackLookup>> {
    let carrier = payload.carrier.filter(|c| !c.trim().is_empty());
    let tracking = payload.tracking.filter(|t| !t.trim().is_empty());
    let (Some(carrier), Some(tracking)) = (carrier, tracking) else {
        return Err(AppError::validation("carrier and tracking are required"));
    };

    let provider = Provider::normalize(&carrier)
        .ok_or_else(|| AppError::UnsupportedCarrier(carrier.clone()))?;

    let lookup = state.lookup.track(provider, &tracking).await?;
    Ok(Json(lookup))
}

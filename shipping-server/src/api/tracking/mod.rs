//! Tracking API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tracking", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/generate", post(handler::generate))
        .route("/formats", get(handler::formats))
        .route("/track", post(handler::track))
}

//! Shipping Lookup API 模块 (公开)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shipping", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/lookup", get(handler::lookup_by_tracking))
}

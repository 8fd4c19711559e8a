//! Shared types for the shipping service
//!
//! Wire-facing models used by the server and its clients: tracking
//! events, carrier formats, generated codes and order summaries.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    CarrierFormat, GenerateTrackingRequest, GeneratedTracking, OrderSummary, TrackLookup,
    TrackRequest, TrackingEvent, UpdateShippingRequest,
};

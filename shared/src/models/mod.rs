//! Wire Models

// Orders
pub mod order;

// Tracking
pub mod tracking;

// Re-exports
pub use order::{OrderSummary, UpdateShippingRequest};
pub use tracking::{
    CarrierFormat, GenerateTrackingRequest, GeneratedTracking, TrackLookup, TrackRequest,
    TrackingEvent,
};

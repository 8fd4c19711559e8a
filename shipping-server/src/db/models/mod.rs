//! Database Models

// Orders
pub mod order;

// Tracking
pub mod tracking_sequence;

// Re-exports
pub use order::{Order, OrderCreate, OrderId, OrderShippingPatch};
pub use tracking_sequence::TrackingSequence;

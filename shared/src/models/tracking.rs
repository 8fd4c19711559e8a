//! Tracking Models
//!
//! Types exchanged on the tracking endpoints: generated codes, carrier
//! format descriptions and normalized provider events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One normalized shipment event reported by a carrier
///
/// Provider payloads are heterogeneous; every field is therefore optional
/// and the original record is kept verbatim in `raw`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub time: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub raw: Value,
}

/// Result of a provider tracking lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackLookup {
    /// Canonical provider name (e.g. "Flash", "ไปรษณีย์ไทย")
    pub provider: String,
    pub tracking: String,
    /// `None` when the provider responded but no event list was found
    pub events: Option<Vec<TrackingEvent>>,
    /// Present on mocked / degraded responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Generated tracking code with its sequence scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedTracking {
    pub code: String,
    /// Sequence scope key, e.g. "ORD:ABC:20250115"
    pub key: String,
    pub counter: i64,
}

/// Carrier tracking-number format (for client-side display)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierFormat {
    pub name: String,
    pub description: String,
    pub regex: String,
    pub examples: Vec<String>,
}

/// Payload for POST /api/tracking/generate
///
/// Fields are optional at the serde level so a missing `format` yields a
/// proper validation error instead of a body-rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTrackingRequest {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
}

/// Payload for POST /api/tracking/track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRequest {
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub tracking: Option<String>,
}

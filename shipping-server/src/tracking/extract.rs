//! Provider Response Extraction
//!
//! Carrier APIs disagree on where the event list lives and what its
//! fields are called. A chain of named extractors probes the known
//! shapes in priority order, then a generic scan handles unknown
//! providers; each raw event is normalized into [`TrackingEvent`] with
//! the original record kept in `raw`. New provider shapes are added as
//! new chain entries without touching the lookup flow.

use serde_json::Value;
use shared::models::TrackingEvent;

/// Known event-list locations, probed in order
static EXTRACTORS: &[(&str, fn(&Value) -> Option<&Vec<Value>>)] = &[
    ("events", top_level_events),
    ("tracking.events", tracking_events),
    ("data.history", data_history),
    ("tracking_history", tracking_history),
    ("data.track", data_track),
    ("first-object-array", first_object_array),
];

fn top_level_events(data: &Value) -> Option<&Vec<Value>> {
    data.get("events")?.as_array()
}

fn tracking_events(data: &Value) -> Option<&Vec<Value>> {
    data.get("tracking")?.get("events")?.as_array()
}

fn data_history(data: &Value) -> Option<&Vec<Value>> {
    data.get("data")?.get("history")?.as_array()
}

fn tracking_history(data: &Value) -> Option<&Vec<Value>> {
    data.get("tracking_history")?.as_array()
}

fn data_track(data: &Value) -> Option<&Vec<Value>> {
    data.get("data")?.get("track")?.as_array()
}

/// Heuristic fallback: the first top-level array (in document order,
/// hence the `preserve_order` feature) whose first element is itself an
/// object.
fn first_object_array(data: &Value) -> Option<&Vec<Value>> {
    data.as_object()?
        .values()
        .filter_map(Value::as_array)
        .find(|arr| arr.first().is_some_and(Value::is_object))
}

/// Extract and normalize the event list from a provider response.
///
/// `None` when no plausible event list was found anywhere.
pub fn extract_events(data: &Value) -> Option<Vec<TrackingEvent>> {
    for (shape, extractor) in EXTRACTORS {
        if let Some(raw_events) = extractor(data) {
            tracing::debug!(shape, events = raw_events.len(), "Extracted provider events");
            return Some(raw_events.iter().map(normalize_event).collect());
        }
    }
    None
}

// Field aliases per normalized attribute, priority order
const TIME_FIELDS: &[&str] = &["time", "datetime", "timestamp", "date", "status_time", "event_time"];
const STATUS_FIELDS: &[&str] = &["status", "description", "message", "status_description", "event"];
const LOCATION_FIELDS: &[&str] = &["location", "place", "area", "branch"];

fn normalize_event(raw: &Value) -> TrackingEvent {
    TrackingEvent {
        time: first_scalar(raw, TIME_FIELDS),
        status: first_scalar(raw, STATUS_FIELDS),
        location: first_scalar(raw, LOCATION_FIELDS),
        raw: raw.clone(),
    }
}

/// First non-empty scalar among the aliased fields
fn first_scalar(record: &Value, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match record.get(*field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level_events() {
        let data = json!({"events": [{"time": "2025-01-15T10:00:00Z", "status": "Delivered"}]});
        let events = extract_events(&data).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time.as_deref(), Some("2025-01-15T10:00:00Z"));
        assert_eq!(events[0].status.as_deref(), Some("Delivered"));
    }

    #[test]
    fn test_nested_tracking_events() {
        let data = json!({"tracking": {"events": [{"datetime": "t1", "description": "In transit"}]}});
        let events = extract_events(&data).unwrap();
        assert_eq!(events[0].time.as_deref(), Some("t1"));
        assert_eq!(events[0].status.as_deref(), Some("In transit"));
    }

    #[test]
    fn test_data_history_shape() {
        let data = json!({"data": {"history": [{"timestamp": 1736899200, "message": "Picked up"}]}});
        let events = extract_events(&data).unwrap();
        assert_eq!(events[0].time.as_deref(), Some("1736899200"));
        assert_eq!(events[0].status.as_deref(), Some("Picked up"));
    }

    #[test]
    fn test_tracking_history_shape() {
        let data = json!({"tracking_history": [{"event_time": "t", "event": "s", "branch": "BKK"}]});
        let events = extract_events(&data).unwrap();
        assert_eq!(events[0].location.as_deref(), Some("BKK"));
    }

    #[test]
    fn test_data_track_shape() {
        let data = json!({"data": {"track": [{"date": "d", "status_description": "out"}]}});
        let events = extract_events(&data).unwrap();
        assert_eq!(events[0].status.as_deref(), Some("out"));
    }

    #[test]
    fn test_generic_scan_fallback() {
        let data = json!({"meta": 1, "shipment_updates": [{"time": "t", "place": "Hub"}]});
        let events = extract_events(&data).unwrap();
        assert_eq!(events[0].location.as_deref(), Some("Hub"));
    }

    #[test]
    fn test_generic_scan_prefers_document_order() {
        // "updates" precedes "history" in the document but not
        // alphabetically; the scan must pick the first in document order
        let data = json!({
            "updates": [{"time": "t1", "status": "first"}],
            "history": [{"time": "t2", "status": "second"}]
        });
        let events = extract_events(&data).unwrap();
        assert_eq!(events[0].status.as_deref(), Some("first"));
    }

    #[test]
    fn test_generic_scan_skips_scalar_arrays() {
        let data = json!({"codes": [1, 2, 3], "note": "no events here"});
        assert!(extract_events(&data).is_none());
    }

    #[test]
    fn test_no_events_found() {
        assert!(extract_events(&json!({"ok": true})).is_none());
        assert!(extract_events(&json!(null)).is_none());
    }

    #[test]
    fn test_field_priority_and_raw_kept() {
        let data = json!({"events": [{"time": "primary", "datetime": "secondary", "extra": 7}]});
        let events = extract_events(&data).unwrap();
        assert_eq!(events[0].time.as_deref(), Some("primary"));
        assert_eq!(events[0].raw["extra"], 7);
    }

    #[test]
    fn test_empty_string_fields_skipped() {
        let data = json!({"events": [{"status": "", "description": "fallback"}]});
        let events = extract_events(&data).unwrap();
        assert_eq!(events[0].status.as_deref(), Some("fallback"));
    }
}

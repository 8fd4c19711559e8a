//! Router-level API tests against an in-memory database.
//!
//! Run: cargo test -p shipping-server --test api_tracking

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use shipping_server::db::models::OrderCreate;
use shipping_server::db::repository::OrderRepository;
use shipping_server::{Config, ServerState, build_app};

async fn test_state() -> ServerState {
    let config = Config::with_overrides("./target/test-work", 0);
    ServerState::initialize_in_memory(&config).await
}

async fn test_app() -> (Router, ServerState) {
    let state = test_state().await;
    (build_app().with_state(state.clone()), state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn today() -> String {
    chrono::Local::now().format("%Y%m%d").to_string()
}

#[tokio::test]
async fn generate_ord_codes_are_sequential() {
    let (app, _state) = test_app().await;

    let (status, body) = send(&app, "POST", "/api/tracking/generate", Some(json!({"format": "ORD"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["counter"], 1);
    assert_eq!(body["code"], format!("ORD-{}-000001", today()));
    assert_eq!(body["key"], format!("ORD:{}", today()));

    let (status, body) = send(&app, "POST", "/api/tracking/generate", Some(json!({"format": "ORD"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["counter"], 2);
    assert_eq!(body["code"], format!("ORD-{}-000002", today()));
}

#[tokio::test]
async fn generate_with_branch_scopes_key() {
    let (app, _state) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/tracking/generate",
        Some(json!({"format": "SHOP001", "branch": "bkk"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["key"], format!("SHOP001:BKK:{}", today()));
    assert_eq!(body["code"], format!("BKK-{}-001", today()));
}

#[tokio::test]
async fn generate_rejects_bad_format() {
    let (app, _state) = test_app().await;

    let (status, _) = send(&app, "POST", "/api/tracking/generate", Some(json!({"format": "FOO"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/api/tracking/generate", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn formats_table_is_exported() {
    let (app, _state) = test_app().await;

    let (status, body) = send(&app, "GET", "/api/tracking/formats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let formats = body["formats"].as_array().unwrap();
    let kerry = formats
        .iter()
        .find(|f| f["name"] == "Kerry Express")
        .expect("Kerry Express entry");
    assert_eq!(kerry["regex"], "(?i)^[A-Z]{2}[0-9]{9}$");
    assert_eq!(kerry["examples"][0], "SHP123456789");
}

#[tokio::test]
async fn track_requires_supported_carrier() {
    let (app, _state) = test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/tracking/track",
        Some(json!({"carrier": "Carrier Pigeon", "tracking": "X1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/api/tracking/track", Some(json!({"carrier": "Flash"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Empty strings count as missing, not as an unknown carrier
    let (status, body) = send(
        &app,
        "POST",
        "/api/tracking/track",
        Some(json!({"carrier": "", "tracking": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "carrier and tracking are required");
}

#[tokio::test]
async fn track_unconfigured_provider_returns_mock() {
    let (app, _state) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/tracking/track",
        Some(json!({"carrier": "Flash Express", "tracking": "1234567890123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "Flash");
    assert_eq!(body["tracking"], "1234567890123");
    assert_eq!(body["events"][0]["status"], "Mocked");
    assert!(!body["warning"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn update_shipping_persists_carrier_and_code() {
    let (app, state) = test_app().await;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .create(OrderCreate {
            order_status: None,
            cart_total: None,
        })
        .await
        .unwrap();
    let order_id = order.id.unwrap().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        "/api/orders/shipping",
        Some(json!({"orderId": order_id, "carrier": "Kerry Express", "tracking": "SHP123456789"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["tracking_carrier"], "Kerry Express");
    assert_eq!(body["order"]["tracking_code"], "SHP123456789");
}

#[tokio::test]
async fn update_shipping_rejects_format_mismatch() {
    let (app, state) = test_app().await;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .create(OrderCreate {
            order_status: None,
            cart_total: None,
        })
        .await
        .unwrap();
    let order_id = order.id.unwrap().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        "/api/orders/shipping",
        Some(json!({"order_id": order_id, "carrier": "Kerry Express", "tracking": "1234567890"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    // The declared example is echoed so the admin can self-correct
    assert_eq!(body["example"], "SHP123456789");
}

#[tokio::test]
async fn update_shipping_missing_order_is_404() {
    let (app, _state) = test_app().await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/orders/shipping",
        Some(json!({"order_id": "order:doesnotexist", "carrier": "Kerry", "tracking": "SHP123456789"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shipping_lookup_finds_order_by_tracking() {
    let (app, state) = test_app().await;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .create(OrderCreate {
            order_status: Some("Processing".to_string()),
            cart_total: None,
        })
        .await
        .unwrap();
    let order_id = order.id.unwrap().to_string();

    let (status, _) = send(
        &app,
        "PUT",
        "/api/orders/shipping",
        Some(json!({"order_id": order_id, "carrier": "Kerry Express", "tracking": "SHP123456789"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/shipping/lookup?tracking=SHP123456789", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["order"]["tracking_code"], "SHP123456789");
    assert_eq!(body["order"]["order_status"], "Processing");
    // Unconfigured provider: no synthetic events on the public lookup
    assert_eq!(body["events"], Value::Null);
}

#[tokio::test]
async fn shipping_lookup_requires_query_and_match() {
    let (app, _state) = test_app().await;

    let (status, _) = send(&app, "GET", "/api/shipping/lookup", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/shipping/lookup?tracking=EG999999999TH", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

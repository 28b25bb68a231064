//! End-to-end API tests against the router with an on-disk store
//!
//! Card checkout paths that would reach Stripe over the network are covered
//! only up to the point where the handler rejects locally (amount mismatch,
//! wrong payment method, unknown booking).

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use sauna_server::ledger::NewBooking;
use sauna_server::{AppState, Config, PaymentMethod, create_router};

fn test_state(data_dir: &std::path::Path) -> AppState {
    let config = Config {
        http_port: 0,
        data_dir: data_dir.to_string_lossy().into_owned(),
        environment: "development".into(),
        stripe_secret_key: "sk_test_dummy".into(),
        success_url: "https://example.com/success.html".into(),
        cancel_url: "https://example.com/cancel.html".into(),
        currency: "huf".into(),
        price_per_person: 2500,
        slot_capacity: 6,
        booking_days: vec!["2026-02-01".into(), "2026-02-02".into()],
        booking_times: vec!["10:00".into(), "11:30".into()],
        smtp: None,
    };
    AppState::new(&config).unwrap()
}

fn test_app(data_dir: &std::path::Path) -> (Router, AppState) {
    let state = test_state(data_dir);
    (create_router(state.clone()), state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn book_body(day: &str, time: &str, people: i64) -> Value {
    json!({
        "day": day,
        "time": time,
        "people": people,
        "name": "Kiss Anna",
        "email": "anna@example.com",
        "phone": "+36 30 123 4567",
        "payment": "cash",
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path());

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn availability_starts_at_zero_for_every_slot() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path());

    let (status, body) = get(&app, "/api/availability").await;
    assert_eq!(status, StatusCode::OK);
    let map = body.as_object().unwrap();
    assert_eq!(map.len(), 4);
    assert_eq!(map["2026-02-01|10:00"], 0);
    assert_eq!(map["2026-02-02|11:30"], 0);
}

#[tokio::test]
async fn calendar_publishes_grid_and_pricing() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path());

    let (status, body) = get(&app, "/api/calendar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["capacity"], 6);
    assert_eq!(body["pricePerPerson"], 2500);
    assert_eq!(body["currency"], "huf");
    assert_eq!(body["days"].as_array().unwrap().len(), 2);
    assert_eq!(body["times"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn cash_booking_confirms_and_updates_availability() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path());

    let (status, body) = post(&app, "/api/book", book_body("2026-02-01", "10:00", 2)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookingNumber"], 1);
    assert!(body.get("paymentUrl").is_none());

    let (_, availability) = get(&app, "/api/availability").await;
    assert_eq!(availability["2026-02-01|10:00"], 2);
    assert_eq!(availability["2026-02-01|11:30"], 0);
}

#[tokio::test]
async fn overbooking_returns_conflict_and_keeps_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path());

    let (status, _) = post(&app, "/api/book", book_body("2026-02-01", "10:00", 4)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, "/api/book", book_body("2026-02-01", "10:00", 3)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("2 remaining"), "got: {message}");

    let (_, availability) = get(&app, "/api/availability").await;
    assert_eq!(availability["2026-02-01|10:00"], 4);
}

#[tokio::test]
async fn zero_people_is_rejected_before_the_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path());

    let (status, body) = post(&app, "/api/book", book_body("2026-02-01", "10:00", 0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("people"));

    let (_, availability) = get(&app, "/api/availability").await;
    assert_eq!(availability["2026-02-01|10:00"], 0);
}

#[tokio::test]
async fn missing_email_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path());

    let mut body = book_body("2026-02-01", "10:00", 2);
    body.as_object_mut().unwrap().remove("email");

    let (status, body) = post(&app, "/api/book", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn unknown_slot_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path());

    let (status, body) = post(&app, "/api/book", book_body("2026-07-01", "10:00", 2)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Unknown session"));
}

#[tokio::test]
async fn checkout_for_unknown_booking_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path());

    let (status, body) = post(&app, "/api/checkout", json!({ "bookingNumber": 99 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("99"));
}

#[tokio::test]
async fn checkout_requires_booking_number() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path());

    let (status, body) = post(&app, "/api/checkout", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("bookingNumber"));
}

#[tokio::test]
async fn checkout_rejects_cash_bookings() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path());

    let (status, body) = post(&app, "/api/book", book_body("2026-02-01", "10:00", 2)).await;
    assert_eq!(status, StatusCode::OK);
    let number = body["bookingNumber"].as_u64().unwrap();

    let (status, body) = post(&app, "/api/checkout", json!({ "bookingNumber": number })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("cash"));
}

#[tokio::test]
async fn checkout_rejects_client_amount_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = test_app(dir.path());

    // Admit a card booking directly so no payment session is attempted.
    let booking = state
        .ledger
        .admit(NewBooking {
            day: "2026-02-01".into(),
            time: "11:30".into(),
            people: 3,
            name: "Kiss Anna".into(),
            email: "anna@example.com".into(),
            phone: None,
            payment: PaymentMethod::Card,
        })
        .unwrap();

    // Canonical amount is 3 × 2500 = 7500; the stale client figure is refused.
    let (status, body) = post(
        &app,
        "/api/checkout",
        json!({ "bookingNumber": booking.booking_number, "amount": 7000 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("7500"), "got: {message}");
}

#[tokio::test]
async fn bookings_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();

    {
        let (app, _) = test_app(dir.path());
        let (status, _) = post(&app, "/api/book", book_body("2026-02-02", "10:00", 5)).await;
        assert_eq!(status, StatusCode::OK);
    }

    // Fresh state over the same data directory
    let (app, _) = test_app(dir.path());
    let (_, availability) = get(&app, "/api/availability").await;
    assert_eq!(availability["2026-02-02|10:00"], 5);

    // Booking numbers continue, never reused
    let (status, body) = post(&app, "/api/book", book_body("2026-02-02", "11:30", 1)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookingNumber"], 2);
}

mod common;

use actix_web::test;
use serde_json::{json, Value};
use serial_test::serial;

use common::{booking_payload, TestApp};

async fn post_json(test_app: &TestApp, uri: &str, payload: &Value) -> (u16, Value) {
    let app = test::init_service(test_app.create_app()).await;
    let req = test::TestRequest::post().uri(uri).set_json(payload).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

async fn get_status(test_app: &TestApp, uri: &str) -> (u16, Option<Value>) {
    let app = test::init_service(test_app.create_app()).await;
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    (status, serde_json::from_slice(&body).ok())
}

#[actix_rt::test]
#[serial]
async fn test_promo_apply() {
    let test_app = TestApp::new().await;

    let (status, body) =
        post_json(&test_app, "/api/promo/apply", &json!({"code": "SAVE20", "subtotal": 100})).await;
    assert_eq!(status, 200);
    assert_eq!(body["valid"], true);
    assert_eq!(body["discount"], 20.0);
    assert_eq!(body["total"], 80.0);
}

#[actix_rt::test]
#[serial]
async fn test_promo_apply_unknown_code() {
    let test_app = TestApp::new().await;

    let (status, body) =
        post_json(&test_app, "/api/promo/apply", &json!({"code": "XYZ", "subtotal": 100})).await;
    assert_eq!(status, 200);
    assert_eq!(body["valid"], false);
    assert_eq!(body["discount"], 0.0);
    assert_eq!(body["total"], 100.0);
    assert!(body["error"].as_str().unwrap().contains("XYZ"));
}

#[actix_rt::test]
#[serial]
async fn test_promo_apply_rejects_negative_subtotal() {
    let test_app = TestApp::new().await;
    let (status, _) =
        post_json(&test_app, "/api/promo/apply", &json!({"code": "SAVE20", "subtotal": -1})).await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
#[serial]
async fn test_quote_uses_tour_price() {
    let test_app = TestApp::new().await;
    let payload = json!({"tourId": 1, "adults": 2, "children": 1, "promoCode": "SAVE20"});

    let (status, body) = post_json(&test_app, "/api/bookings/quote", &payload).await;
    assert_eq!(status, 200);
    assert_eq!(body["adultPrice"], 38.0);
    assert_eq!(body["childPrice"], 19.0);
    assert_eq!(body["subtotal"], 95.0);
    assert_eq!(body["discount"], 19.0);
    assert_eq!(body["total"], 76.0);
}

#[actix_rt::test]
#[serial]
async fn test_quote_without_tour_uses_default_price() {
    let test_app = TestApp::new().await;

    let (status, body) = post_json(&test_app, "/api/bookings/quote", &json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["adults"], 1);
    assert_eq!(body["total"], 49.0);

    let (status, _) = post_json(&test_app, "/api/bookings/quote", &json!({"tourId": 99})).await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
#[serial]
async fn test_create_booking_and_read_it_back() {
    let test_app = TestApp::new().await;

    let (status, _) = get_status(&test_app, "/api/bookings/last").await;
    assert_eq!(status, 404);

    let (status, booking) = post_json(&test_app, "/api/bookings", &booking_payload()).await;
    assert_eq!(status, 201);
    assert_eq!(booking["tourName"], "Gobustan Tour");
    assert_eq!(booking["participants"], 3);
    assert_eq!(booking["promoCode"], "SAVE20");
    assert_eq!(booking["pricing"]["total"], 76.0);
    assert!(booking["createdAt"].is_string());

    let (status, last) = get_status(&test_app, "/api/bookings/last").await;
    assert_eq!(status, 200);
    assert_eq!(last.unwrap()["id"], booking["id"]);
    assert!(test_app.dir.path().join("bookings.json").exists());
}

#[actix_rt::test]
#[serial]
async fn test_invalid_promo_does_not_block_booking() {
    let test_app = TestApp::new().await;
    let mut payload = booking_payload();
    payload["promoCode"] = json!("XYZ");

    let (status, booking) = post_json(&test_app, "/api/bookings", &payload).await;
    assert_eq!(status, 201);
    assert!(booking["promoCode"].is_null());
    assert_eq!(booking["pricing"]["discount"], 0.0);
    assert!(booking["pricing"]["promoError"].is_string());
}

#[actix_rt::test]
#[serial]
async fn test_invalid_booking_lists_field_errors() {
    let test_app = TestApp::new().await;
    let mut payload = booking_payload();
    payload["customerEmail"] = json!("nope");
    payload["adults"] = json!(0);
    payload["date"] = json!("2001-01-01");

    let (status, body) = post_json(&test_app, "/api/bookings", &payload).await;
    assert_eq!(status, 400);

    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|error| error["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["customerEmail", "date", "adults"]);

    let (status, _) = get_status(&test_app, "/api/bookings/last").await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
#[serial]
async fn test_booking_with_too_many_tickets() {
    let test_app = TestApp::new().await;
    let mut payload = booking_payload();
    payload["adults"] = json!(4294967295u32);
    payload["children"] = json!(4294967295u32);

    let (status, body) = post_json(&test_app, "/api/bookings", &payload).await;
    assert_eq!(status, 400);

    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|error| error["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["adults", "children"]);
}

#[actix_rt::test]
#[serial]
async fn test_blank_promo_code_is_ignored() {
    let test_app = TestApp::new().await;
    let mut payload = booking_payload();
    payload["promoCode"] = json!("  ");

    let (status, booking) = post_json(&test_app, "/api/bookings", &payload).await;
    assert_eq!(status, 201);
    assert!(booking["promoCode"].is_null());
    assert!(booking["pricing"].get("promoError").is_none());
    assert_eq!(booking["pricing"]["total"], 95.0);

    let (status, body) =
        post_json(&test_app, "/api/promo/apply", &json!({"code": "", "subtotal": 100})).await;
    assert_eq!(status, 200);
    assert_eq!(body["valid"], false);
}

#[actix_rt::test]
#[serial]
async fn test_booking_for_unknown_tour() {
    let test_app = TestApp::new().await;
    let mut payload = booking_payload();
    payload["tourId"] = json!(42);

    let (status, _) = post_json(&test_app, "/api/bookings", &payload).await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
#[serial]
async fn test_booking_rate_limit() {
    let test_app = TestApp::with_rate_limit(2).await;

    for _ in 0..2 {
        let (status, _) = post_json(&test_app, "/api/bookings", &booking_payload()).await;
        assert_eq!(status, 201);
    }

    let (status, body) = post_json(&test_app, "/api/bookings", &booking_payload()).await;
    assert_eq!(status, 429);
    assert!(body["error"].is_string());
}

use actix_web::{http::StatusCode, test, App};
use serde_json::json;
use tikiti_payment_engine::{db_types::OrderStatus, traits::OrderStore};

use crate::{
    data_objects::OrderCreatedResponse,
    endpoint_tests::{
        helpers::{new_api, new_test_db, post_json},
        mocks::MockGateway,
    },
    routes::health,
};

fn jane_payload() -> serde_json::Value {
    json!({
        "fullName": "Jane Wanjiku",
        "email": "jane@example.com",
        "phone": "0712345678",
        "amount": 500,
        "quantity": 2,
        "eventId": "e1",
        "eventName": "Gala Night"
    })
}

#[actix_web::test]
async fn health_check() {
    let app = test::init_service(App::new().service(health)).await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    assert_eq!(body, "👍️\n");
}

#[actix_web::test]
async fn create_order_initiates_a_push() {
    let db = new_test_db().await;
    let (status, body) = post_json(&db, MockGateway::accepting("TXN-1"), "/order", jane_payload()).await;
    assert_eq!(status, StatusCode::OK);
    let response: OrderCreatedResponse = serde_json::from_str(&body).expect("Invalid response body");
    assert_eq!(response.status, "InitiatedStkPush");
    assert_eq!(response.provider_txn_id.as_deref(), Some("TXN-1"));
    assert_eq!(response.provider_merchant_txn_id.as_deref(), Some(response.order_id.as_str()));
    assert_eq!(response.order_id.len(), 16);
}

#[actix_web::test]
async fn invalid_bookings_are_rejected() {
    let db = new_test_db().await;
    let mut payload = jane_payload();
    payload["phone"] = json!("");
    let (status, body) = post_json(&db, MockGateway::accepting("TXN-2"), "/order", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("phone is required"), "{body}");
}

#[actix_web::test]
async fn declined_pushes_surface_as_bad_gateway() {
    let db = new_test_db().await;
    let (status, body) = post_json(&db, MockGateway::declining("no float"), "/order", jane_payload()).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("no float"), "{body}");
}

#[actix_web::test]
async fn paid_callback_settles_the_order() {
    let db = new_test_db().await;
    let api = new_api(&db);
    let order = api.place_order(jane_payload_as_booking(), &MockGateway::accepting("TXN-3")).await.unwrap();
    let callback = json!({
        "statusCode": 200,
        "message": "Success. Transaction completed",
        "results": { "merchantTxnId": order.id.as_str(), "transactionId": "TXN-3" }
    });
    let (status, body) = post_json(&db, MockGateway::accepting("TXN-3"), "/stk/callback", callback).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"success\":true"), "{body}");
    let stored = db.fetch_order_by_id(&order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Paid);
}

#[actix_web::test]
async fn malformed_callbacks_are_bad_requests() {
    let db = new_test_db().await;
    let (status, body) = post_json(&db, MockGateway::default(), "/stk/callback", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("error"), "{body}");
}

#[actix_web::test]
async fn unmatched_callbacks_are_not_found() {
    let db = new_test_db().await;
    let callback = json!({
        "statusCode": 200,
        "message": "Success",
        "results": { "merchantTxnId": "deadbeef00000000" }
    });
    let (status, _body) = post_json(&db, MockGateway::default(), "/stk/callback", callback).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn conflicting_callbacks_are_conflicts() {
    let db = new_test_db().await;
    let api = new_api(&db);
    let order = api.place_order(jane_payload_as_booking(), &MockGateway::accepting("TXN-4")).await.unwrap();
    let paid = json!({
        "statusCode": 200,
        "message": "Success",
        "results": { "merchantTxnId": order.id.as_str() }
    });
    let (status, _) = post_json(&db, MockGateway::default(), "/stk/callback", paid).await;
    assert_eq!(status, StatusCode::OK);
    let cancelled = json!({
        "statusCode": 400,
        "message": "Request cancelled by user",
        "results": { "merchantTxnId": order.id.as_str() }
    });
    let (status, body) = post_json(&db, MockGateway::default(), "/stk/callback", cancelled).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("already been settled"), "{body}");
}

#[actix_web::test]
async fn duplicate_callbacks_are_acknowledged() {
    let db = new_test_db().await;
    let api = new_api(&db);
    let order = api.place_order(jane_payload_as_booking(), &MockGateway::accepting("TXN-5")).await.unwrap();
    let paid = json!({
        "statusCode": 200,
        "message": "Success",
        "results": { "merchantTxnId": order.id.as_str() }
    });
    let (status, _) = post_json(&db, MockGateway::default(), "/stk/callback", paid).await;
    assert_eq!(status, StatusCode::OK);
    let duplicate = json!({
        "statusCode": 400,
        "message": "Duplicate request",
        "results": { "merchantTxnId": order.id.as_str() }
    });
    let (status, body) = post_json(&db, MockGateway::default(), "/stk/callback", duplicate).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("already processed"), "{body}");
}

fn jane_payload_as_booking() -> tikiti_payment_engine::db_types::NewOrder {
    tikiti_payment_engine::db_types::NewOrder {
        full_name: "Jane Wanjiku".to_string(),
        email: "jane@example.com".to_string(),
        phone: "0712345678".to_string(),
        amount: 500.into(),
        quantity: 2,
        event_id: "e1".to_string(),
        event_name: "Gala Night".to_string(),
    }
}

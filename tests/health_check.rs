#[macro_use]
mod common;

use actix_web::test;
use chrono::DateTime;
use common::test_state;

#[actix_web::test]
async fn test_health_check() {
    let state = test_state();
    state.item_store.create("one").await.unwrap();
    let app = init_app!(state);

    // Send request
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    // Verify response format
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["items"], 1);
    assert!(DateTime::parse_from_rfc3339(
        json["timestamp"].as_str().unwrap()
    ).is_ok());
}

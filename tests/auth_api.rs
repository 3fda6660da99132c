#[macro_use]
mod common;

use actix_web::test;
use chrono::{Duration, Utc};
use common::{bearer, test_state, token_for};
use itemlist_server::{AppState, AuthService, Settings};
use serde_json::json;

#[actix_web::test]
async fn test_login_success() {
    let state = test_state();
    let app = init_app!(state);

    let response = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "test", "password": "test123" }))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = test::read_body_json(response).await;
    let token = body["token"].as_str().expect("token missing");
    assert_eq!(state.auth_service.verify(token).unwrap(), "test");

    let response = test::TestRequest::get()
        .uri("/items")
        .insert_header(bearer(token))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 200);
}

#[actix_web::test]
async fn test_invalid_login() {
    let state = test_state();
    let app = init_app!(state);

    for credentials in [
        json!({ "username": "test", "password": "wrong" }),
        json!({ "username": "bad", "password": "bad" }),
    ] {
        let response = test::TestRequest::post()
            .uri("/login")
            .set_json(credentials)
            .send_request(&app)
            .await;

        assert_eq!(response.status(), 401);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "error": "Invalid credentials" }));
    }
}

#[actix_web::test]
async fn test_login_missing_fields() {
    let state = test_state();
    let app = init_app!(state);

    for payload in [
        json!({}),
        json!({ "username": "test" }),
        json!({ "password": "test123" }),
        json!({ "username": "", "password": "test123" }),
        json!({ "username": "test", "password": "" }),
        json!({ "username": null, "password": null }),
    ] {
        let response = test::TestRequest::post()
            .uri("/login")
            .set_json(payload)
            .send_request(&app)
            .await;

        assert_eq!(response.status(), 400);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "error": "Username and password required" }));
    }
}

#[actix_web::test]
async fn test_login_without_body() {
    let state = test_state();
    let app = init_app!(state);

    let response = test::TestRequest::post()
        .uri("/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 400);

    let response = test::TestRequest::post()
        .uri("/login")
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 400);
}

#[actix_web::test]
async fn test_missing_header_rejected_on_every_protected_route() {
    let state = test_state();
    let app = init_app!(state);
    let item = state.item_store.create("keep").await.unwrap();
    let item_uri = format!("/items/{}", item.id);

    let requests = vec![
        test::TestRequest::get().uri("/items"),
        test::TestRequest::post().uri("/items").set_json(json!({ "text": "x" })),
        test::TestRequest::put().uri(&item_uri).set_json(json!({ "text": "x" })),
        test::TestRequest::delete().uri(&item_uri),
    ];

    for request in requests {
        let response = request.send_request(&app).await;
        assert_eq!(response.status(), 401);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "error": "Unauthorized: missing token" }));
    }

    let items = state.item_store.list().await;
    assert_eq!(items, vec![item]);
}

#[actix_web::test]
async fn test_header_without_token_segment() {
    let state = test_state();
    let app = init_app!(state);

    for header in ["Bearer", "Bearer ", "abc"] {
        let response = test::TestRequest::get()
            .uri("/items")
            .insert_header(("Authorization", header))
            .send_request(&app)
            .await;

        assert_eq!(response.status(), 401);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "error": "Unauthorized: malformed token" }));
    }
}

#[actix_web::test]
async fn test_invalid_token() {
    let state = test_state();
    let app = init_app!(state);

    let response = test::TestRequest::get()
        .uri("/items")
        .insert_header(bearer("invalid_token"))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "error": "Unauthorized: invalid token" }));
}

#[actix_web::test]
async fn test_expired_token() {
    let state = test_state();
    let app = init_app!(state);

    let token = state
        .auth_service
        .generate_token_at("test", Utc::now() - Duration::hours(2))
        .unwrap();

    let response = test::TestRequest::post()
        .uri("/items")
        .insert_header(bearer(&token))
        .set_json(json!({ "text": "late" }))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 401);
    assert!(state.item_store.is_empty().await);
}

#[actix_web::test]
async fn test_token_signed_with_other_key() {
    let state = test_state();
    let app = init_app!(state);

    let foreign = AuthService::new(Vec::new(), "other_secret".to_string(), Duration::hours(1));
    let token = foreign.generate_token_at("test", Utc::now()).unwrap();

    let response = test::TestRequest::get()
        .uri("/items")
        .insert_header(bearer(&token))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 401);
}

#[actix_web::test]
async fn test_signing_key_from_configuration() {
    let mut config = Settings::new_for_test().unwrap();
    config.auth.jwt_secret = "rotated_secret".to_string();
    let rotated = actix_web::web::Data::new(AppState::new(config).unwrap());

    let token = token_for(&test_state());
    assert!(rotated.auth_service.verify(&token).is_err());
    assert!(rotated.auth_service.verify(&token_for(&rotated)).is_ok());
}

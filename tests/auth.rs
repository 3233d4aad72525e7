mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{
    init_app, json_body, login, register, send, services, TEST_HASH_COST, TEST_SECRET,
};
use taskpad::auth::{hash_password, SessionKeys};
use taskpad::store::UserStore;

#[test_log::test(actix_rt::test)]
async fn test_register_and_login_flow() {
    let (store, services) = services();
    let app = init_app(&services).await;

    let (status, body) = register(&app, "alice", "pw1").await;
    assert_eq!(status, StatusCode::CREATED, "Registration failed. Body: {}", body);

    let created = json_body(&body);
    assert_eq!(created["message"], "User registered");
    assert_eq!(created["user"]["username"], "alice");
    assert!(created["user"]["id"].is_i64());
    assert!(
        created["user"].get("password").is_none() && created["user"].get("password_hash").is_none(),
        "registration must not echo the password hash: {}",
        body
    );

    let (status, body) = login(&app, "alice", "pw1").await;
    assert_eq!(status, StatusCode::OK, "Login failed. Body: {}", body);

    let token = json_body(&body)["token"].as_str().unwrap().to_string();
    let claims = SessionKeys::new(TEST_SECRET).verify(&token).unwrap();
    let stored = store.find_user("alice").await.unwrap().unwrap();
    assert_eq!(claims.sub, stored.id);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[actix_rt::test]
async fn test_duplicate_registration_fails() {
    let (store, services) = services();
    let app = init_app(&services).await;

    let (status, _) = register(&app, "alice", "pw1").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register(&app, "alice", "another").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Server error");

    assert_eq!(store.user_count(), 1);

    // The first password still works.
    let (status, _) = login(&app, "alice", "pw1").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = login(&app, "alice", "another").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_login_failures_do_not_reveal_usernames() {
    let (_, services) = services();
    let app = init_app(&services).await;
    register(&app, "alice", "pw1").await;

    let (wrong_password_status, wrong_password_body) = login(&app, "alice", "wrongpw").await;
    let (unknown_user_status, unknown_user_body) = login(&app, "nobody", "pw1").await;

    assert_eq!(wrong_password_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_user_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password_body, "Invalid username or password");
    assert_eq!(wrong_password_body, unknown_user_body);
    assert!(!wrong_password_body.contains("token"));
}

#[actix_rt::test]
async fn test_login_does_not_apply_registration_rules() {
    let (_, services) = services();
    let app = init_app(&services).await;

    let test_cases = vec![
        ("no such!", "pw", "username the registration rules reject"),
        ("x", "", "empty password"),
        ("", "pw", "empty username"),
    ];

    for (username, password, description) in test_cases {
        let (status, body) = login(&app, username, password).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "Test case failed: {}", description);
        assert_eq!(body, "Invalid username or password", "Test case failed: {}", description);
    }
}

#[actix_rt::test]
async fn test_accounts_predating_username_rules_can_log_in() {
    let (store, services) = services();
    let app = init_app(&services).await;

    let hash = hash_password("pw1", TEST_HASH_COST).unwrap();
    store.insert_user("john doe", &hash).await.unwrap();

    let (status, body) = login(&app, "john doe", "pw1").await;
    assert_eq!(status, StatusCode::OK, "Login failed. Body: {}", body);
    assert!(json_body(&body)["token"].is_string());
}

#[actix_rt::test]
async fn test_invalid_registration_inputs() {
    let (store, services) = services();
    let app = init_app(&services).await;

    let test_cases = vec![
        // Deserialization errors
        (json!({ "password": "pw1" }), StatusCode::BAD_REQUEST, "missing username"),
        (json!({ "username": "alice" }), StatusCode::BAD_REQUEST, "missing password"),
        // Validation errors
        (
            json!({ "username": "", "password": "pw1" }),
            StatusCode::UNPROCESSABLE_ENTITY,
            "empty username",
        ),
        (
            json!({ "username": "user name!", "password": "pw1" }),
            StatusCode::UNPROCESSABLE_ENTITY,
            "username with invalid chars",
        ),
        (
            json!({ "username": "a".repeat(65), "password": "pw1" }),
            StatusCode::UNPROCESSABLE_ENTITY,
            "username too long",
        ),
        (
            json!({ "username": "alice", "password": "" }),
            StatusCode::UNPROCESSABLE_ENTITY,
            "empty password",
        ),
    ];

    for (payload, expected_status, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(&payload)
            .to_request();
        let (status, body) = send(&app, req).await;

        assert_eq!(
            status, expected_status,
            "Test case failed: {}. Body: {}",
            description, body
        );
    }

    assert_eq!(store.user_count(), 0);
}

#[actix_rt::test]
async fn test_login_with_malformed_body() {
    let (_, services) = services();
    let app = init_app(&services).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_health_is_public() {
    let (_, services) = services();
    let app = init_app(&services).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["status"], "ok");
}

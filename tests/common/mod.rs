#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, App};
use serde_json::{json, Value};
use std::sync::Arc;

use taskpad::auth::SessionKeys;
use taskpad::store::MemoryStore;
use taskpad::AppServices;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Low bcrypt cost keeps the suite fast; the hashing itself is covered by
/// unit tests at the production cost.
pub const TEST_HASH_COST: u32 = 4;

pub fn services() -> (Arc<MemoryStore>, AppServices) {
    let store = Arc::new(MemoryStore::new());
    let services =
        AppServices::with_hash_cost(store.clone(), SessionKeys::new(TEST_SECRET), TEST_HASH_COST);
    (store, services)
}

pub async fn init_app(
    services: &AppServices,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(taskpad::app::cors())
            .wrap(Logger::default())
            .configure(|cfg| services.configure(cfg)),
    )
    .await
}

/// Sends a request and returns its status and raw body text.
pub async fn send<S, B>(app: &S, req: actix_http::Request) -> (StatusCode, String)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub fn json_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("body is not JSON ({}): {}", e, body))
}

pub async fn register<S, B>(app: &S, username: &str, password: &str) -> (StatusCode, String)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    send(app, req).await
}

pub async fn login<S, B>(app: &S, username: &str, password: &str) -> (StatusCode, String)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    send(app, req).await
}

/// Registers and logs in, returning the session token.
pub async fn token_for<S, B>(app: &S, username: &str, password: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = register(app, username, password).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

    let (status, body) = login(app, username, password).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);

    json_body(&body)["token"]
        .as_str()
        .expect("login response has a token")
        .to_string()
}

pub fn authorized(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header((header::AUTHORIZATION, token.to_string()))
}

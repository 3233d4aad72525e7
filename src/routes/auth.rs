use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

use crate::{
    auth::{AuthService, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    error::AppError,
};

/// Register a new user
///
/// Hashes the password and stores the account.
///
/// ## Responses:
/// - `201 Created`: `{"message": "User registered", "user": {"id", "username"}}`.
/// - `400 Bad Request`: Body is not JSON or a field is missing.
/// - `422 Unprocessable Entity`: Username or password fails validation.
/// - `500 Internal Server Error`: Username taken, or any store failure.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    body: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    let user = auth.register(&body.username, &body.password).await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered".into(),
        user,
    }))
}

/// Login user
///
/// Exchanges a username and password for a session token valid for one hour.
///
/// ## Responses:
/// - `200 OK`: `{"token": "..."}`.
/// - `400 Bad Request`: Unknown username or wrong password (same body for both),
///   or a malformed body.
/// - `500 Internal Server Error`: Store failure.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let token = auth.authenticate(&body.username, &body.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

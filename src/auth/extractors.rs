use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use super::token::{SessionError, SessionKeys};
use crate::error::AppError;

/// The authenticated caller of a protected route.
///
/// Extracting an `Identity` is the session check: the raw token is read from
/// the `Authorization` header (no `Bearer` scheme) and verified against the
/// application's [`SessionKeys`]. A missing or empty header is rejected with
/// 403 "Token is required", anything that fails verification with 403
/// "Invalid token". Handlers that take an `Identity` never run for a caller
/// without a valid session.
///
/// Keep `Identity` as the first handler argument so the session check runs
/// before the request body is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity(pub i32);

impl Identity {
    pub fn user_id(self) -> i32 {
        self.0
    }

    fn authenticate(req: &HttpRequest) -> Result<Self, AppError> {
        let keys = req.app_data::<web::Data<SessionKeys>>().ok_or_else(|| {
            AppError::InternalServerError("SessionKeys missing from app data".into())
        })?;

        let token = match req.headers().get(AUTHORIZATION) {
            None => return Err(SessionError::MissingToken.into()),
            Some(value) => value.to_str().map_err(|_| SessionError::InvalidToken)?.trim(),
        };
        if token.is_empty() {
            return Err(SessionError::MissingToken.into());
        }

        let claims = keys.verify(token)?;
        Ok(Identity(claims.sub))
    }
}

impl FromRequest for Identity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::authenticate(req).map_err(ActixError::from))
    }
}

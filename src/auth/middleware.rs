//! Bearer-token extraction for protected routes.
//!
//! Handlers take an [`Identity`] argument; extraction fails with a 401 before
//! the handler body runs when the request carries no valid token.

use crate::error::{AppError, AuthError};
use crate::AppState;
use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use tracing::warn;

/// The authenticated caller. Every valid identity may act on every item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

/// Pulls the token segment out of an `Authorization` header value.
///
/// The scheme word is not inspected; the token is whatever follows the first space.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::MissingToken)?;
    value
        .split(' ')
        .nth(1)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MalformedToken)
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("application state not configured".into()))?;

    let header = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| AuthError::MalformedToken)?),
        None => None,
    };

    let token = bearer_token(header)?;
    let username = state.auth_service.verify(token)?;

    Ok(Identity { username })
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = authenticate(req);
        if let Err(e) = &result {
            warn!("Rejected {} {}: {}", req.method(), req.path(), e);
        }
        ready(result)
    }
}

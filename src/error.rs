use thiserror::Error;
use actix_web::{ResponseError, HttpResponse, http::StatusCode};
use serde_json::json;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    AuthError(#[from] AuthError),

    #[error(transparent)]
    ItemError(#[from] ItemError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::InternalError(format!("password hashing failed: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::InternalError(format!("token signing failed: {}", err))
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthError(e) => match e {
                AuthError::InvalidInput => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials
                | AuthError::MissingToken
                | AuthError::MalformedToken
                | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            },
            AppError::ItemError(e) => match e {
                ItemError::EmptyInput => StatusCode::BAD_REQUEST,
                ItemError::DuplicateItem => StatusCode::CONFLICT,
                ItemError::NotFound => StatusCode::NOT_FOUND,
            },
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username and password required")]
    InvalidInput,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: missing token")]
    MissingToken,

    #[error("Unauthorized: malformed token")]
    MalformedToken,

    #[error("Unauthorized: invalid token")]
    InvalidToken,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ItemError {
    #[error("Item text cannot be empty")]
    EmptyInput,

    #[error("Duplicate item")]
    DuplicateItem,

    #[error("Item not found")]
    NotFound,
}

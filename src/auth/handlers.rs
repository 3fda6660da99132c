use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use crate::AppState;
use crate::error::AppError;
use tracing::{info, warn};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let username = req.username.as_deref().unwrap_or_default();
    let password = req.password.as_deref().unwrap_or_default();

    info!("Received login request for username: {}", username);
    match state.auth_service.login(username, password) {
        Ok(token) => {
            info!("Login successful for username: {}", username);
            Ok(HttpResponse::Ok().json(AuthResponse { token }))
        }
        Err(e) => {
            warn!("Login failed for username: {}: {}", username, e);
            Err(e)
        }
    }
}

pub mod auth;
pub mod config;
pub mod error;
pub mod items;

use std::sync::Arc;
use actix_web::{web, HttpResponse};
use actix_cors::Cors;
use crate::config::CorsConfig;

pub use error::AppError;
use error::ItemError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use crate::config::Settings;

pub use auth::{AuthService, Identity};
pub use items::{Item, ItemStore};

/// Health check endpoint handler
/// Returns a JSON response with server status, timestamp and item count
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "items": state.item_store.len().await,
    }))
}

/// Application state shared across all workers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub auth_service: Arc<AuthService>,
    pub item_store: Arc<ItemStore>,
}

impl AppState {
    pub fn new(config: Settings) -> Result<Self> {
        let auth_service = AuthService::from_config(&config.auth)?;
        let item_store = ItemStore::with_items(&config.store.initial_items)?;

        Ok(Self {
            config: Arc::new(config),
            auth_service: Arc::new(auth_service),
            item_store: Arc::new(item_store),
        })
    }
}

/// Registers every route on `cfg`. `POST /test/reset` is only mounted when
/// `enable_test_routes` is true.
pub fn configure_routes(cfg: &mut web::ServiceConfig, enable_test_routes: bool) {
    use auth::handlers::login;
    use items::handlers::{create_item, delete_item, list_items, reset_items, update_item};

    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidBody(err.to_string()).into()),
    )
    // A non-integer id can never name an item.
    .app_data(
        web::PathConfig::default()
            .error_handler(|_err, _req| AppError::from(ItemError::NotFound).into()),
    )
    .route("/health", web::get().to(health_check))
    .route("/login", web::post().to(login))
    .service(
        web::resource("/items")
            .route(web::get().to(list_items))
            .route(web::post().to(create_item)),
    )
    .service(
        web::resource("/items/{id}")
            .route(web::put().to(update_item))
            .route(web::delete().to(delete_item)),
    );

    if enable_test_routes {
        cfg.route("/test/reset", web::post().to(reset_items));
    }
}

/// CORS policy for the browser client, driven by the `cors.*` settings.
pub fn build_cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        // CORS disabled - use most restrictive settings
        return Cors::default();
    }

    let cors = if config.allow_any_origin {
        Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec!["Authorization", "Content-Type"])
    };

    cors.max_age(config.max_age as usize)
}

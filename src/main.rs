use actix_web::{web, App, HttpServer};
use itemlist_server::{build_cors, configure_routes, AppState, Settings, AppError};
use dotenv::dotenv;
use std::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> itemlist_server::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(true)
        .init();

    // Load configuration
    let config = Settings::new()?;
    info!("Configuration loaded successfully ({})", config.environment);

    if config.server.enable_test_routes {
        warn!("Test routes are enabled; POST /test/reset can wipe all items");
    }

    let state = AppState::new(config.clone())?;
    info!("Seeded {} item(s)", state.item_store.len().await);
    let state = web::Data::new(state);

    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;
    info!("Backend running on http://{}:{}", config.server.host, config.server.port);

    let enable_test_routes = config.server.enable_test_routes;
    let cors_config = config.cors.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_config))
            .app_data(state.clone())
            .configure(|cfg| configure_routes(cfg, enable_test_routes))
    })
    .listen(listener)?
    .workers(config.server.workers as usize)
    .run()
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(())
}

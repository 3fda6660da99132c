#![allow(dead_code)]

use actix_web::web;
use itemlist_server::{AppState, Settings};

pub fn test_state() -> web::Data<AppState> {
    let config = Settings::new_for_test().expect("Failed to load test config");
    web::Data::new(AppState::new(config).expect("Failed to build app state"))
}

/// Signs a token directly through the auth service, skipping the login route.
pub fn token_for(state: &web::Data<AppState>) -> String {
    state
        .auth_service
        .login("test", "test123")
        .expect("seed user login failed")
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Builds the full route table around `state`.
#[macro_export]
macro_rules! init_app {
    ($state:expr) => {
        $crate::init_app!($state, true)
    };
    ($state:expr, $test_routes:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.clone())
                .configure(|cfg| itemlist_server::configure_routes(cfg, $test_routes)),
        )
        .await
    };
}

use config::{Config, ConfigBuilder, ConfigError, Environment, File, Map, Value};
use config::builder::DefaultState;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: u32,
    /// Mounts `POST /test/reset`. Never enable this outside of test runs.
    pub enable_test_routes: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiry_secs: i64,
    pub password_hash_cost: u32,
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub initial_items: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub enabled: bool,
    pub allow_any_origin: bool,
    pub allowed_origins: Vec<String>,
    pub max_age: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub environment: String,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub store: StoreConfig,
    pub cors: CorsConfig,
}

fn seed_user(username: &str, password: &str) -> Value {
    let mut user = Map::new();
    user.insert("username".to_string(), Value::from(username));
    user.insert("password".to_string(), Value::from(password));
    Value::from(user)
}

fn with_defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("environment", environment)?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 4000)?
        .set_default("server.workers", num_cpus::get() as i64)?
        .set_default("server.enable_test_routes", false)?
        .set_default("auth.jwt_secret", "development_secret")?
        .set_default("auth.token_expiry_secs", 3600)?
        .set_default("auth.password_hash_cost", 8)?
        .set_default("auth.users", vec![seed_user("test", "test123")])?
        .set_default("store.initial_items", vec!["First item"])?
        .set_default("cors.enabled", true)?
        .set_default("cors.allow_any_origin", true)?
        .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
        .set_default("cors.max_age", 3600)
}

fn env_source() -> Environment {
    // E.g., `APP_SERVER__PORT=5001` would set `Settings.server.port`
    Environment::with_prefix("app")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        with_defaults("development")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Deterministic settings for tests: cheap bcrypt cost, test routes mounted,
    /// empty item store.
    pub fn new_for_test() -> Result<Self, ConfigError> {
        with_defaults("test")?
            .set_override("server.enable_test_routes", true)?
            .set_override("auth.jwt_secret", "test_secret")?
            .set_override("auth.password_hash_cost", 4)?
            .set_override("store.initial_items", Vec::<String>::new())?
            .build()?
            .try_deserialize()
    }
}

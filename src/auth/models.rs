use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub password_hash: String, // bcrypt hash - never serialize
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // Username
    pub exp: i64,     // Expiration time
    pub iat: i64,     // Issued at
}

use crate::auth::models::{Claims, User};
use crate::config::AuthConfig;
use crate::error::{AppError, AuthError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, decode, Header, EncodingKey, DecodingKey, Validation, Algorithm};
use std::collections::HashMap;
use tracing::debug;

pub struct AuthService {
    users: HashMap<String, User>,
    jwt_secret: String,
    token_expiry: Duration,
    /// Compared against on unknown usernames so a miss costs the same bcrypt work as a hit.
    unknown_user_hash: Option<String>,
}

impl AuthService {
    pub fn new(users: Vec<User>, jwt_secret: String, token_expiry: Duration) -> Self {
        let unknown_user_hash = users.first().map(|u| u.password_hash.clone());
        Self {
            users: users.into_iter().map(|u| (u.username.clone(), u)).collect(),
            jwt_secret,
            token_expiry,
            unknown_user_hash,
        }
    }

    /// Hashes the configured seed users and builds the service around them.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        let token_expiry = Duration::try_seconds(config.token_expiry_secs)
            .filter(|expiry| *expiry > Duration::zero())
            .ok_or_else(|| {
                AppError::ConfigError(format!(
                    "auth.token_expiry_secs must be a positive number of seconds, got {}",
                    config.token_expiry_secs
                ))
            })?;

        let users = config
            .users
            .iter()
            .map(|seed| -> Result<User, AppError> {
                let hash = bcrypt::hash(&seed.password, config.password_hash_cost)?;
                Ok(User::new(seed.username.clone(), hash))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut service = Self::new(users, config.jwt_secret.clone(), token_expiry);
        service.unknown_user_hash =
            Some(bcrypt::hash("unknown-user-placeholder", config.password_hash_cost)?);
        Ok(service)
    }

    /// Checks the credentials and returns a signed token with the username as subject.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput.into());
        }

        let Some(user) = self.users.get(username) else {
            if let Some(hash) = &self.unknown_user_hash {
                let _ = bcrypt::verify(password, hash);
            }
            return Err(AuthError::InvalidCredentials.into());
        };

        if !bcrypt::verify(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        self.generate_token_at(&user.username, Utc::now())
    }

    /// Validates signature and expiry, returning the token's subject.
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        let claims = self.decode_token(token).map_err(|e| {
            debug!("Token rejected: {}", e);
            AuthError::InvalidToken
        })?;

        Ok(claims.sub)
    }

    /// Signs a token as if it had been issued at `issued_at`.
    pub fn generate_token_at(
        &self,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let expires_at = issued_at
            .checked_add_signed(self.token_expiry)
            .ok_or_else(|| AppError::InternalError("token expiry out of range".into()))?;

        let claims = Claims {
            sub: username.to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    fn decode_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )?;

        Ok(claims.claims)
    }
}

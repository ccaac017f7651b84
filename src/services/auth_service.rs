//! Authentication service.
//!
//! Registration provisions credentials plus a TOTP secret; login exchanges
//! credentials for a stateless JWT. Password hashing lives in the domain
//! `Password` value object, repository access goes through the Unit of Work.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, ROLE_ADMIN, ROLE_CLIENT, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, TwoFactorSetup, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload.
///
/// Profile ids are resolved at login so per-request scoping never needs an
/// extra lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_profile_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_profile_id: Option<Uuid>,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Response returned once at registration. The secret and QR code are never
/// retrievable again.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    /// TOTP provisioning QR code as an SVG data URL
    pub qr_code: String,
    /// Base32 TOTP secret for manual authenticator entry
    pub secret: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and issue 2FA provisioning material
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> AppResult<RegisterResponse>;

    /// Login and return JWT token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Role assigned at self-registration: the very first account becomes the
/// administrator, every later one is a client.
fn role_for_registration(existing_users: u64) -> &'static str {
    if existing_users == 0 {
        ROLE_ADMIN
    } else {
        ROLE_CLIENT
    }
}

/// Generate JWT token for a user (shared helper to avoid duplication)
fn generate_token(
    user: &User,
    client_profile_id: Option<Uuid>,
    employee_profile_id: Option<Uuid>,
    config: &Config,
) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role.to_string(),
        client_profile_id,
        employee_profile_id,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> AppResult<RegisterResponse> {
        // Field shape is validated by the handler's ValidatedJson extractor
        let password_hash = Password::new(&password)?.into_string();
        let setup = TwoFactorSetup::generate(&email)?;
        let secret = setup.secret.clone();

        // Serializable so two concurrent first registrations cannot both
        // observe an empty table and both become ADMIN
        let user = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    let users = ctx.users();

                    if users.find_by_email(&email).await?.is_some() {
                        return Err(AppError::DuplicateEmail);
                    }

                    let role = role_for_registration(users.count().await?);

                    users
                        .create(email, password_hash, name, role.to_string(), Some(secret))
                        .await
                })
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(RegisterResponse {
            success: true,
            qr_code: setup.qr_code,
            secret: setup.secret,
        })
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user_result = self.uow.users().find_by_email(&email).await?;

        // Verify against a dummy hash when the email is unknown so response
        // timing cannot enumerate valid accounts
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let user = match user_result {
            Some(user) => user,
            None => return Err(AppError::InvalidCredentials),
        };

        // Resolve the role-matching profile id into the token
        let (client_profile_id, employee_profile_id) = match user.role {
            UserRole::Client => {
                let profile = self.uow.users().find_client_profile(user.id).await?;
                (profile.map(|p| p.id), None)
            }
            UserRole::Employee => {
                let profile = self.uow.users().find_employee_profile(user.id).await?;
                (None, profile.map(|p| p.id))
            }
            UserRole::Admin => (None, None),
        };

        info!(user_id = %user.id, "User logged in");

        generate_token(&user, client_profile_id, employee_profile_id, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_registration_becomes_admin() {
        assert_eq!(role_for_registration(0), ROLE_ADMIN);
    }

    #[test]
    fn later_registrations_become_clients() {
        assert_eq!(role_for_registration(1), ROLE_CLIENT);
        assert_eq!(role_for_registration(42), ROLE_CLIENT);
    }
}

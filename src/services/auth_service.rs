//! Authentication service - the identity provider surface.
//!
//! Issues and verifies JWTs and owns the account lifecycle. Deliberately
//! role-free: tokens carry only identity (id + email), and the effective
//! role is resolved fresh on every request so a newly assigned role row
//! takes effect without re-login.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Account, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{AccountRepository, ProfileRepository};
use crate::jobs::{EmailJob, Mailer};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
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

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account and its profile row.
    async fn register(
        &self,
        email: String,
        password: String,
        full_name: String,
    ) -> AppResult<Account>;

    /// Login and return JWT token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Dispatch a password reset link if the email is known.
    /// Always succeeds so callers cannot enumerate accounts.
    async fn request_password_reset(&self, email: String) -> AppResult<()>;
}

/// Generate JWT token for an account (shared helper to avoid duplication)
fn generate_token(account: &Account, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: account.id,
        email: account.email.clone(),
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

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of `AuthService`.
pub struct Authenticator {
    accounts: Arc<dyn AccountRepository>,
    profiles: Arc<dyn ProfileRepository>,
    mailer: Arc<dyn Mailer>,
    config: Config,
}

impl Authenticator {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        profiles: Arc<dyn ProfileRepository>,
        mailer: Arc<dyn Mailer>,
        config: Config,
    ) -> Self {
        Self {
            accounts,
            profiles,
            mailer,
            config,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(
        &self,
        email: String,
        password: String,
        full_name: String,
    ) -> AppResult<Account> {
        // Email format is validated by the handler's ValidatedJson extractor
        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("An account with this email already exists"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let account = self.accounts.create(email, password_hash).await?;

        // Profile row attaches on first sign-in; the record write rides on
        // account creation having durably succeeded.
        self.profiles
            .create(account.id, Some(full_name))
            .await?;

        Ok(account)
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let account_result = self.accounts.find_by_email(&email).await?;

        // SECURITY: Perform password verification even if the account
        // doesn't exist to prevent timing attacks that could enumerate
        // valid emails. The dummy hash always fails verification.
        let dummy_hash = "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, account_exists) = match &account_result {
            Some(account) => (account.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        if !account_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe: account_exists was checked above
        match account_result {
            Some(account) => generate_token(&account, &self.config),
            None => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }

    async fn request_password_reset(&self, email: String) -> AppResult<()> {
        let Some(account) = self.accounts.find_by_email(&email).await? else {
            // Unknown email: succeed silently
            return Ok(());
        };

        // Short-lived reset token; the reset completion flow lives with
        // the identity provider, outside this core.
        let now = Utc::now();
        let claims = Claims {
            sub: account.id,
            email: account.email.clone(),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        let reset_url = format!("{}/reset-password?token={}", self.config.site_url, token);
        let job = EmailJob::password_reset(account.email, &reset_url);

        if let Err(e) = self.mailer.send(job).await {
            tracing::warn!(error = %e, "Failed to enqueue password reset email");
        }

        Ok(())
    }
}

//! Authentication service - Registration, login and token verification.
//!
//! Registration goes through the registration transform; password hashing
//! lives in the domain `Password` value object.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::serializers::registration::{self, RegisteredUser, RegistrationInput};
use domain::{Password, User};

/// Verified against when the email is unknown so both paths do the same work.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$Kx0kVqj9cOYZmJ6eQ6bq1Ad4yQFM0bVfj9H1f1xZrXU";

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
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
    /// Register a new account
    async fn register(&self, input: RegistrationInput) -> AppResult<RegisteredUser>;

    /// Login and return JWT token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
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
pub struct Authenticator {
    uow: Arc<dyn UnitOfWork>,
    config: Config,
}

impl Authenticator {
    pub fn new(uow: Arc<dyn UnitOfWork>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, input: RegistrationInput) -> AppResult<RegisteredUser> {
        registration::register(self.uow.as_ref(), input).await
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_email(email.trim()).await?;

        let password_hash = user
            .as_ref()
            .map_or(DUMMY_HASH, |user| user.password_hash.as_str());
        let password_valid = Password::from_hash(password_hash.to_string()).verify(&password);

        let user = match user {
            Some(user) if password_valid && user.is_active => user,
            _ => {
                tracing::debug!("Rejected login attempt");
                return Err(AppError::InvalidCredentials);
            }
        };

        self.uow.users().record_login(user.id).await?;
        tracing::info!(user_id = user.id, "User logged in");

        generate_token(&user, &self.config)
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
    use crate::infra::{
        MockPersistence, MockProductRepository, MockShopRepository, MockUserRepository,
    };

    const SECRET: &str = "a-very-long-secret-for-testing-purposes";

    fn user(active: bool, password: &str) -> User {
        User {
            id: 12,
            email: "ada@example.com".to_string(),
            username: "ada@example.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: Password::new(password).unwrap().into_string(),
            is_superuser: false,
            is_staff: false,
            is_active: active,
            date_joined: Utc::now(),
            last_login: None,
        }
    }

    fn service(users: MockUserRepository) -> Authenticator {
        let uow = MockPersistence::new(users, MockShopRepository::new(), MockProductRepository::new());
        Authenticator::new(Arc::new(uow), Config::new(SECRET))
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let stored = user(true, "correct-horse");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));
        users.expect_record_login().times(1).returning(|_| Ok(()));

        let auth = service(users);
        let token = auth
            .login("ada@example.com".to_string(), "correct-horse".to_string())
            .await
            .unwrap();

        assert_eq!(token.token_type, "Bearer");
        let claims = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, 12);
        assert_eq!(claims.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let stored = user(true, "correct-horse");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));
        users.expect_record_login().never();

        let err = service(users)
            .login("ada@example.com".to_string(), "wrong-horse".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let err = service(users)
            .login("nobody@example.com".to_string(), "whatever-pass".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_inactive_user_rejected() {
        let stored = user(false, "correct-horse");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));
        users.expect_record_login().never();

        let err = service(users)
            .login("ada@example.com".to_string(), "correct-horse".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let auth = service(MockUserRepository::new());
        assert!(matches!(auth.verify_token("not.a.token"), Err(AppError::Jwt(_))));
    }
}

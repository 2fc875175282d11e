//! Account registration.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use domain::{NewUser, Password, User, MSG_EMAIL_TAKEN, MSG_REQUIRED};

/// Registration payload.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegistrationInput {
    #[schema(example = "ada@example.com")]
    #[validate(
        required(message = "This field is required."),
        email(message = "Enter a valid email address.")
    )]
    pub email: Option<String>,

    #[serde(default)]
    #[schema(example = "Ada")]
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub first_name: String,

    #[serde(default)]
    #[schema(example = "Lovelace")]
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub last_name: String,

    #[schema(example = "correct-horse-battery")]
    #[validate(
        required(message = "This field is required."),
        length(min = 8, message = "Ensure this field has at least 8 characters.")
    )]
    pub password: Option<String>,
}

/// Registered account as echoed back to the client. Never holds the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RegisteredUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for RegisteredUser {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Validate the payload, hash the password and persist the new account.
///
/// The login identifier is set to the email address.
pub async fn register(uow: &dyn UnitOfWork, input: RegistrationInput) -> AppResult<RegisteredUser> {
    input.validate()?;

    let email = input
        .email
        .map(|email| email.trim().to_string())
        .ok_or_else(|| AppError::validation("email", MSG_REQUIRED))?;
    let password = input
        .password
        .ok_or_else(|| AppError::validation("password", MSG_REQUIRED))?;

    if uow.users().find_by_email(&email).await?.is_some() {
        return Err(AppError::validation("email", MSG_EMAIL_TAKEN));
    }

    let password_hash = Password::new(&password)?.into_string();
    let new_user = NewUser::registration(email, input.first_name, input.last_name, password_hash);
    let user = uow.users().create(new_user).await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(RegisteredUser::from(&user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        MockPersistence, MockProductRepository, MockShopRepository, MockUserRepository,
    };
    use chrono::Utc;
    use mockall::predicate::eq;

    fn input(email: Option<&str>, password: Option<&str>) -> RegistrationInput {
        RegistrationInput {
            email: email.map(str::to_string),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password: password.map(str::to_string),
        }
    }

    fn persisted(new_user: NewUser) -> User {
        User {
            id: 1,
            email: new_user.email,
            username: new_user.username,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash: new_user.password_hash,
            is_superuser: false,
            is_staff: false,
            is_active: true,
            date_joined: Utc::now(),
            last_login: None,
        }
    }

    fn uow(users: MockUserRepository) -> MockPersistence {
        MockPersistence::new(users, MockShopRepository::new(), MockProductRepository::new())
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_uses_email_as_username() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .with(eq("ada@example.com"))
            .returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|new_user| {
                new_user.username == "ada@example.com"
                    && new_user.password_hash != "correct-horse"
                    && new_user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|new_user| Ok(persisted(new_user)));

        let registered = register(&uow(users), input(Some("ada@example.com"), Some("correct-horse")))
            .await
            .unwrap();

        assert_eq!(registered.email, "ada@example.com");
        assert_eq!(registered.first_name, "Ada");
    }

    #[tokio::test]
    async fn test_register_output_has_no_password() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .returning(|new_user| Ok(persisted(new_user)));

        let registered = register(&uow(users), input(Some("ada@example.com"), Some("correct-horse")))
            .await
            .unwrap();
        let json = serde_json::to_value(&registered).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_register_reports_missing_fields() {
        let mut users = MockUserRepository::new();
        users.expect_create().never();

        let err = register(&uow(users), input(None, None)).await.unwrap_err();

        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields.get("email").unwrap()[0], MSG_REQUIRED);
                assert_eq!(fields.get("password").unwrap()[0], MSG_REQUIRED);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_short_password_and_bad_email() {
        let users = MockUserRepository::new();

        let err = register(&uow(users), input(Some("not-an-email"), Some("short")))
            .await
            .unwrap_err();

        match err {
            AppError::Validation(fields) => {
                assert!(fields.get("email").is_some());
                assert!(fields.get("password").is_some());
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_taken_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|email| {
            Ok(Some(persisted(NewUser::registration(
                email.to_string(),
                String::new(),
                String::new(),
                "hash".to_string(),
            ))))
        });
        users.expect_create().never();

        let err = register(&uow(users), input(Some("ada@example.com"), Some("correct-horse")))
            .await
            .unwrap_err();

        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields.get("email").unwrap()[0], MSG_EMAIL_TAKEN);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}

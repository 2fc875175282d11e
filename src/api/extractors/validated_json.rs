//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::Segment;
use validator::Validate;

use crate::errors::AppError;
use domain::NON_FIELD_ERRORS;

/// JSON body that has passed its declarative `validator` rules.
///
/// Unparsable JSON becomes a bad request. A value of the wrong type and any
/// rule failure become a validation error naming the field.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use dream_space::api::extractors::ValidatedJson;
///
/// #[derive(Deserialize, Validate)]
/// struct LoginRequest {
///     #[validate(email)]
///     email: String,
/// }
///
/// async fn login(ValidatedJson(payload): ValidatedJson<LoginRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value: T = decode(req, state).await?;
        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// JSON body whose rejection is reported in the application error format.
///
/// For payloads whose rules are enforced by the transform they feed.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        decode(req, state).await.map(JsonBody)
    }
}

/// Parse the body as JSON, then map it onto `T`, keeping the path of the
/// first value that does not fit.
async fn decode<S, T>(req: Request, state: &S) -> Result<T, AppError>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    let Json(raw) = Json::<Value>::from_request(req, state)
        .await
        .map_err(|e: JsonRejection| AppError::BadRequest(e.body_text()))?;

    serde_path_to_error::deserialize(raw).map_err(|e| {
        let field = match e.path().iter().next() {
            Some(Segment::Map { key }) => key.clone(),
            _ => NON_FIELD_ERRORS.to_string(),
        };
        AppError::validation(field, e.inner().to_string())
    })
}

//! Axum extractors for request bodies
//!
//! [`ValidJson`] parses a JSON body and runs its `validator` rules before the
//! handler sees it, so malformed input never reaches the store.

use crate::core::error::ServiceError;
use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor that deserializes and validates a JSON body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_food(
///     ValidJson(payload): ValidJson<NewFood>,
/// ) -> ServiceResult<(StatusCode, Json<Food>)> {
///     // payload.restaurant_id is present and non-empty here
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await?;
        payload.validate()?;
        Ok(ValidJson(payload))
    }
}

//! Custom Axum extractors
//!
//! Wrap axum's `Json` and `Query` so decode failures come back as
//! `validation_error` bodies instead of axum's plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

/// JSON request body
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::Validation(ValidationError::InvalidBody(rejection.body_text()))
            })?;
        Ok(Self(value))
    }
}

/// Query-string parameters
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::Validation(ValidationError::InvalidQuery(rejection.body_text()))
            })?;
        Ok(Self(value))
    }
}

/// Parse a record id taken from the query string.
///
/// Ids travel as text so that a non-numeric value is reported against the
/// field that carried it.
pub fn parse_id(field: &'static str, raw: Option<&str>) -> Result<i32, ValidationError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::Missing { field })?;

    raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field,
        reason: "must be an integer",
    })
}

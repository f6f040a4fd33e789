//! Custom Axum extractors

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::models::QueryPairs;

/// Query-string parameters where a repeated key keeps its first value.
///
/// Rejections render through [`ApiError`] like every other failure.
pub struct FirstValueQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for FirstValueQuery<T>
where
    S: Send + Sync,
    T: From<QueryPairs>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs): Query<Vec<(String, String)>> = Query::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        Ok(Self(T::from(pairs.into_iter().collect())))
    }
}

//! Typed path parameter extractor for integer identifiers.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Extractor for numeric path parameters.
///
/// Wraps [`Path`] so that a non-numeric id is reported as a standard
/// `INVALID_PATH_PARAM` error instead of axum's plain-text rejection.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_component(IdPath((space_id, component_id)): IdPath<(i64, i64)>) -> String {
///     format!("{space_id}/{component_id}")
/// }
///
/// let app = Router::new().route("/learning-spaces/{space_id}/learning-component/{component_id}", get(get_component));
/// ```
pub struct IdPath<T>(pub T);

impl<T, S> FromRequestParts<S> for IdPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(IdPath(value))
    }
}

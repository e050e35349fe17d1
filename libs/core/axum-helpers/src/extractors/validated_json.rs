//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Deserializes the body and runs the `validator` crate's `Validate` impl.
/// A body that is not JSON of the right shape is rejected as
/// `JSON_EXTRACTION`; a body that fails validation is rejected as
/// `VALIDATION_ERROR` with per-field details.
///
/// # Example
/// ```ignore
/// async fn create_whiteboard(
///     ValidatedJson(payload): ValidatedJson<WhiteboardNoIdDto>,
/// ) -> impl IntoResponse { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorResponse;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[validate(range(min = 0.0))]
        height: f64,
    }

    async fn handler(ValidatedJson(payload): ValidatedJson<Payload>) -> String {
        payload.height.to_string()
    }

    async fn send(body: &str) -> (StatusCode, Option<ErrorResponse>) {
        let app = Router::new().route("/", post(handler));
        let response = app
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).ok())
    }

    #[tokio::test]
    async fn test_valid_payload_passes() {
        let (status, _) = send(r#"{"height": 2.0}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_payload_reports_field() {
        let (status, body) = send(r#"{"height": -1.0}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body = body.unwrap();
        assert_eq!(body.error, "VALIDATION_ERROR");
        assert!(body.details.unwrap().get("height").is_some());
    }

    #[tokio::test]
    async fn test_malformed_json_is_extraction_error() {
        let (status, body) = send(r#"{"height": "#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.unwrap().error, "JSON_EXTRACTION");
    }
}

use axum_helpers::ErrorResponse;
use core_config::api_client::ApiClientConfig;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{TransportError, TransportErrorKind};

/// HTTP client for the campus API.
///
/// Every request carries the configured timeout. Non-success responses are
/// turned into a [`TransportError`] carrying the server's error message when
/// the body is a standard error response.
#[derive(Debug, Clone)]
pub struct ComponentApiClient {
    base_url: String,
    client: Client,
}

impl ComponentApiClient {
    pub fn new(config: &ApiClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, TransportError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(self.client.post(self.url(path)).json(body)).await?;
        decode(response).await
    }

    pub async fn put_json<B, R>(&self, path: &str, body: &B) -> Result<R, TransportError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(self.client.put(self.url(path)).json(body)).await?;
        decode(response).await
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, TransportError> {
        let response = self.send(self.client.get(self.url(path))).await?;
        decode(response).await
    }

    pub async fn get_json_with_query<Q, R>(&self, path: &str, query: &Q) -> Result<R, TransportError>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .send(self.client.get(self.url(path)).query(query))
            .await?;
        decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), TransportError> {
        self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, TransportError> {
        let response = request.send().await.inspect_err(|e| {
            warn!(error = %e, "Request to campus API failed");
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Campus API responded");
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "Failed to read campus API error body");
                String::new()
            }
        };
        let message = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(error) => error.message,
            Err(_) if body.is_empty() => status.to_string(),
            Err(_) => body,
        };

        let error = TransportError::from_status(status.as_u16(), message);
        warn!(status = status.as_u16(), kind = %error.kind, message = %error.message, "Campus API rejected request");
        Err(error)
    }
}

async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, TransportError> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        TransportError::new(
            TransportErrorKind::InvalidResponse,
            Some(status),
            format!("invalid response body: {e}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> ComponentApiClient {
        let config = ApiClientConfig::new(format!("{}/api/", server.uri()), Duration::from_secs(2));
        ComponentApiClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_error_response_message_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/learning-spaces/1/learning-component/9"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": 1004,
                "error": "NOT_FOUND",
                "message": "Component 9 not found in learning space 1"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .get_json::<Value>("/learning-spaces/1/learning-component/9")
            .await
            .unwrap_err();

        assert_eq!(err.kind, TransportErrorKind::NotFound);
        assert_eq!(err.status, Some(404));
        assert_eq!(err.message, "Component 9 not found in learning space 1");
    }

    #[tokio::test]
    async fn test_plain_text_error_body_becomes_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .post_json::<_, Value>("/anything", &json!({}))
            .await
            .unwrap_err();

        assert_eq!(err.kind, TransportErrorKind::ServerError);
        assert_eq!(err.message, "maintenance");
        assert!(err.kind.is_transient());
    }

    #[tokio::test]
    async fn test_empty_error_body_falls_back_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.delete("/learning-spaces/1/learning-component/3").await.unwrap_err();

        assert_eq!(err.status, Some(502));
        assert_eq!(err.message, "502 Bad Gateway");
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_json::<Vec<Value>>("/x").await.unwrap_err();

        assert_eq!(err.kind, TransportErrorKind::InvalidResponse);
        assert_eq!(err.status, Some(200));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let config = ApiClientConfig::new(server.uri(), Duration::from_millis(50));
        let client = ComponentApiClient::new(&config).unwrap();
        let err = client.get_json::<Value>("/slow").await.unwrap_err();

        assert_eq!(err.kind, TransportErrorKind::Timeout);
    }
}

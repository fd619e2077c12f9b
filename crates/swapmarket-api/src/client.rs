//! Shared HTTP client for the remote collaborators.
//!
//! Owns the reqwest client (fixed timeout), resolves the base URL, injects
//! the bearer token read from the credential store on every request, and
//! maps non-2xx responses into structured errors.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use swapmarket_core::error::{MarketError, Result};
use swapmarket_core::storage::{AUTH_TOKEN_KEY, CredentialStore};

use crate::config::ApiConfig;

/// Shared transport for `HttpAuthApi` and `HttpChatApi`.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Builds a client with the configured timeout.
    pub fn new(config: ApiConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| MarketError::internal(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attaches the stored bearer token when one exists. A storage read
    /// failure downgrades to an unauthenticated request; the server's
    /// rejection then surfaces through the normal error path.
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.get(AUTH_TOKEN_KEY).await {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(err) => {
                tracing::warn!("Failed to read bearer token from storage: {err}");
                request
            }
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.authorize(self.http.get(self.url(path))).await;
        Self::parse(Self::send(request).await?).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.authorize(self.http.post(self.url(path)).json(body)).await;
        Self::parse(Self::send(request).await?).await
    }

    pub(crate) async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.authorize(self.http.post(self.url(path)).json(body)).await;
        Self::send(request).await.map(|_| ())
    }

    pub(crate) async fn post_empty(&self, path: &str) -> Result<()> {
        let request = self.authorize(self.http.post(self.url(path))).await;
        Self::send(request).await.map(|_| ())
    }

    pub(crate) async fn put_unit(&self, path: &str) -> Result<()> {
        let request = self.authorize(self.http.put(self.url(path))).await;
        Self::send(request).await.map(|_| ())
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> Result<()> {
        let request = self.authorize(self.http.delete(self.url(path))).await;
        Self::send(request).await.map(|_| ())
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|err| MarketError::api(format!("Request failed: {err}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_api_error(status, &body))
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|err| MarketError::Serialization {
            format: "JSON".to_string(),
            message: format!("Failed to parse response body: {err}"),
        })
    }
}

/// Translates a non-2xx response into a `MarketError`.
///
/// The server's `message` field is surfaced verbatim when the body parses;
/// otherwise a generic status-derived message is used. 401 is classified
/// separately so the session manager can purge the stale credential.
pub(crate) fn map_api_error(status: StatusCode, body: &str) -> MarketError {
    let message = extract_message(body)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

    if status == StatusCode::UNAUTHORIZED {
        MarketError::unauthorized(message)
    } else {
        MarketError::api_with_status(status.as_u16(), message)
    }
}

/// Pulls a human-readable message out of the error body.
///
/// Accepts the shapes the API is known to produce: `{"message": ...}`,
/// `{"error": "..."}` and `{"error": {"message": ...}}`.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }

    match value.get("error")? {
        serde_json::Value::String(message) => Some(message.clone()),
        serde_json::Value::Object(inner) => inner
            .get("message")
            .and_then(|m| m.as_str())
            .map(String::from),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_message_field() {
        let err = map_api_error(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":"Email taken"}"#);
        assert!(matches!(
            err,
            MarketError::Api { status_code: Some(422), ref message } if message == "Email taken"
        ));
    }

    #[test]
    fn maps_nested_error_object() {
        let err = map_api_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"type":"invalid_request","message":"Missing receiverId"}}"#,
        );
        assert_eq!(err.user_message(), "Missing receiverId");
    }

    #[test]
    fn maps_plain_error_string() {
        let err = map_api_error(StatusCode::CONFLICT, r#"{"error":"Already exists"}"#);
        assert_eq!(err.user_message(), "Already exists");
    }

    #[test]
    fn unparsable_body_falls_back_to_status() {
        let err = map_api_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(err.user_message(), "Request failed with status 500");
    }

    #[test]
    fn unauthorized_is_classified_separately() {
        let err = map_api_error(StatusCode::UNAUTHORIZED, r#"{"message":"Token expired"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Token expired");
    }
}

//! HTTP client for the external agent deployment API.

use file_host::AgentClientConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure building or using an [`AgentClient`].
pub enum AgentClientError {
    /// A configured header value is not a valid HTTP header.
    #[error("invalid header `{name}`")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
    },
    /// The underlying HTTP client could not be constructed.
    #[error("agent client build failed: {0}")]
    Build(String),
    /// The deployment answered with a non-success status.
    #[error("agent request failed with status {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },
    /// The request never produced a response.
    #[error("agent network error: {0}")]
    Transport(String),
    /// The response body did not match the expected shape.
    #[error("agent response decode failed: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
/// Client bound to one deployment URL with identity headers on every request.
pub struct AgentClient {
    config: AgentClientConfig,
    http: reqwest::Client,
}

fn header_map(config: &AgentClientConfig) -> Result<HeaderMap, AgentClientError> {
    let mut headers = HeaderMap::new();
    for (name, value) in config.default_headers() {
        let value = HeaderValue::from_str(&value)
            .map_err(|_| AgentClientError::InvalidHeader { name })?;
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| AgentClientError::InvalidHeader { name })?;
        headers.insert(header, value);
    }
    Ok(headers)
}

impl AgentClient {
    /// Builds a client from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns an error when a header value is invalid or the HTTP client cannot be built.
    pub fn new(config: AgentClientConfig) -> Result<Self, AgentClientError> {
        let http = reqwest::Client::builder()
            .default_headers(header_map(&config)?)
            .build()
            .map_err(|e| AgentClientError::Build(e.to_string()))?;
        Ok(Self { config, http })
    }

    /// Settings this client was built from.
    pub fn config(&self) -> &AgentClientConfig {
        &self.config
    }

    /// Starts a request against `path` under the deployment URL.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.config.url(path))
    }

    /// `GET`s `path` and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns transport, status, or decode failures.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AgentClientError> {
        send_json(self.request(Method::GET, path)).await
    }

    /// `POST`s `body` as JSON to `path` and decodes the JSON reply.
    ///
    /// # Errors
    ///
    /// Returns transport, status, or decode failures.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AgentClientError> {
        send_json(self.request(Method::POST, path).json(body)).await
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, AgentClientError> {
    let response = request
        .send()
        .await
        .map_err(|e| AgentClientError::Transport(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(AgentClientError::Http {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| AgentClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config(user_id: &str) -> AgentClientConfig {
        AgentClientConfig {
            api_url: "http://127.0.0.1:2024".to_string(),
            api_key: "secret".to_string(),
            user_id: user_id.to_string(),
        }
    }

    #[test]
    fn identity_headers_are_attached() {
        let headers = header_map(&config("u-1")).expect("headers");
        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(headers["x-api-key"], "secret");
        assert_eq!(headers["x-user-id"], "u-1");
    }

    #[test]
    fn invalid_header_value_is_rejected() {
        let err = AgentClient::new(config("bad\nid")).expect_err("newline in header");
        assert_eq!(err, AgentClientError::InvalidHeader { name: "X-User-Id" });
    }

    #[test]
    fn client_keeps_its_config() {
        let client = AgentClient::new(config("u-2")).expect("client");
        assert_eq!(client.config().user_id, "u-2");
    }

    #[test]
    fn requests_resolve_under_the_deployment_url() {
        let client = AgentClient::new(config("u-3")).expect("client");
        let request = client
            .request(Method::POST, "/threads/search")
            .build()
            .expect("request");
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.url().as_str(), "http://127.0.0.1:2024/threads/search");
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn unreachable_client() -> AgentClient {
        AgentClient::new(AgentClientConfig {
            // Nothing listens on the discard port.
            api_url: "http://127.0.0.1:9".to_string(),
            api_key: String::new(),
            user_id: "u-4".to_string(),
        })
        .expect("client")
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn get_json_reports_transport_failure() {
        let err = unreachable_client()
            .get_json::<serde_json::Value>("assistants")
            .await
            .expect_err("nothing listens");
        assert!(matches!(err, AgentClientError::Transport(_)));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn post_json_reports_transport_failure() {
        let err = unreachable_client()
            .post_json::<_, serde_json::Value>("threads/search", &serde_json::json!({ "limit": 1 }))
            .await
            .expect_err("nothing listens");
        assert!(matches!(err, AgentClientError::Transport(_)));
    }
}

//! HTTP client implementation using reqwest.
//!
//! This adapter wraps `reqwest::blocking::Client`. Blocking I/O is used on
//! purpose: every scenario is a plain `#[test]` and must not depend on any
//! async runtime of its own.

use std::collections::HashMap;

use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

use examninja_domain::ResponseSpec;

/// Errors raised while fetching a response.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The client itself could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(String),
    /// The base URL and path did not combine into a valid URL.
    #[error("invalid request URL {url:?}: {message}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The request could not be sent or the response could not be read.
    #[error("transport error for {url}: {message}")]
    Transport {
        /// The URL the request was addressed to.
        url: String,
        /// Underlying transport diagnostic.
        message: String,
    },
    /// The response body was not valid UTF-8 text.
    #[error("response body from {url} is not valid UTF-8")]
    BodyNotText {
        /// The URL the response came from.
        url: String,
    },
}

/// Blocking HTTP client for driving stub endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Creates a client with harness defaults.
    ///
    /// Default configuration:
    /// - Redirects: not followed, responses are asserted as served
    /// - Timeouts: the transport defaults, nothing harness-specific
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] if the underlying client cannot be
    /// created.
    pub fn new() -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent("ExamNinja-Harness/0.1.0")
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a client around a custom blocking client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Issues `GET {base_url}{path}` and returns the decoded response.
    ///
    /// Every HTTP status comes back as a [`ResponseSpec`]; a 404 is a
    /// response, not an error. Only transport failures and undecodable
    /// bodies are errors.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when the combined URL does not
    /// parse, [`ClientError::Transport`] when sending the request or
    /// reading the response fails, and [`ClientError::BodyNotText`] when
    /// the body is not valid UTF-8.
    pub fn get(&self, base_url: &str, path: &str) -> Result<ResponseSpec, ClientError> {
        let url = Self::join(base_url, path)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|error| Self::map_transport(&url, &error))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let bytes = response
            .bytes()
            .map_err(|error| Self::map_transport(&url, &error))?;
        let body = String::from_utf8(bytes.to_vec()).map_err(|_| ClientError::BodyNotText {
            url: url.to_string(),
        })?;

        tracing::debug!(%url, status, bytes = body.len(), "GET completed");
        Ok(ResponseSpec::new(status, headers, body))
    }

    /// Joins a base URL and a path by concatenation.
    ///
    /// Concatenation (rather than `Url::join`) keeps the request path
    /// byte-for-byte what the caller registered as the stub path.
    fn join(base_url: &str, path: &str) -> Result<Url, ClientError> {
        let raw = format!("{}{path}", base_url.trim_end_matches('/'));
        Url::parse(&raw).map_err(|e| ClientError::InvalidUrl {
            url: raw,
            message: e.to_string(),
        })
    }

    /// Maps reqwest errors to [`ClientError::Transport`] with a category
    /// prefix in the message.
    fn map_transport(url: &Url, error: &reqwest::Error) -> ClientError {
        let message = if error.is_timeout() {
            format!("timed out: {error}")
        } else if error.is_connect() {
            format!("connection failed: {error}")
        } else {
            error.to_string()
        };

        ClientError::Transport {
            url: url.to_string(),
            message,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_join_with_and_without_trailing_slash() {
        let url = ApiClient::join("http://127.0.0.1:8082", "/api/startTest").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8082/api/startTest");

        let url = ApiClient::join("http://127.0.0.1:8082/", "/api/startTest").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8082/api/startTest");
    }

    #[test]
    fn test_join_rejects_invalid_base() {
        let err = ApiClient::join("not a url", "/api/startTest").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
        assert!(err.to_string().starts_with("invalid request URL"));
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::Transport {
            url: "http://127.0.0.1:9/api".to_string(),
            message: "connection failed: refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "transport error for http://127.0.0.1:9/api: connection failed: refused"
        );

        let err = ClientError::BodyNotText {
            url: "http://127.0.0.1:9/api".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "response body from http://127.0.0.1:9/api is not valid UTF-8"
        );
    }
}

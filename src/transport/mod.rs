//! Authenticated HTTP transport
//!
//! One configured client per backend origin. Immediately before dispatch the
//! current token is read from the injected [`Session`] and sent as a bearer
//! credential; a 401 from the server evicts that token before the failure is
//! handed back. There are no retries and no timeouts beyond reqwest's defaults.

mod response;

pub use response::ApiResponse;

use reqwest::header::ACCEPT;
use reqwest::{Method, Url};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Why a request did not produce a successful response
#[derive(Error, Debug)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("Request failed with status code {}", .0.status)]
    Status(ApiResponse),

    /// No response was received.
    #[error("{0}")]
    Network(String),

    /// The request body could not be serialized.
    #[error("{0}")]
    Encode(String),
}

/// Shared request-issuing client
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl Transport {
    /// Create a transport for `base_url`, authenticating from `session`
    pub fn new(base_url: &str, session: Session) -> ClientResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            ClientError::Config(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "API base URL must be http or https: {}",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("spendwise-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: parsed,
            session,
        })
    }

    /// The configured backend origin
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The session tokens are read from and evicted into
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse, TransportError> {
        self.send(Method::GET, path, query, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, TransportError> {
        let body = encode(body)?;
        self.send(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, TransportError> {
        let body = encode(body)?;
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, TransportError> {
        self.send(Method::DELETE, path, &[], None).await
    }

    /// Issue one request.
    ///
    /// Errors on every non-2xx status. A 401 removes the stored token first.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, TransportError> {
        let url = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }
        // Read at dispatch: an eviction by a concurrent request applies here.
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        debug!(%method, path, "dispatching request");
        let network = |e: reqwest::Error| {
            warn!(%method, path, error = %e, "request failed without a response");
            TransportError::Network(e.to_string())
        };

        let response = request.send().await.map_err(network)?;
        let status = response.status().as_u16();
        debug!(%method, path, status, "received response");

        // Evict on the status line alone; the body may still fail to arrive.
        if status == 401 {
            warn!(path, "credential rejected, evicting stored token");
            if let Err(e) = self.session.evict_token() {
                error!(error = %e, "failed to evict stored token");
            }
        }

        let response = ApiResponse::read(response).await.map_err(network)?;

        if response.is_success() {
            Ok(response)
        } else {
            Err(TransportError::Status(response))
        }
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, TransportError> {
    serde_json::to_value(body).map_err(|e| TransportError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = Transport::new("not a url", Session::in_memory()).err();
        assert!(matches!(err, Some(ClientError::Config(_))));

        let err = Transport::new("ftp://example.com", Session::in_memory()).err();
        assert!(matches!(err, Some(ClientError::Config(_))));
    }

    #[test]
    fn test_accepts_http_base_url() {
        let transport = Transport::new("http://localhost:8000/", Session::in_memory()).unwrap();
        assert_eq!(transport.base_url().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_status_error_display() {
        let err = TransportError::Status(ApiResponse::new(
            404,
            Default::default(),
            Vec::new(),
        ));
        assert_eq!(err.to_string(), "Request failed with status code 404");
    }
}

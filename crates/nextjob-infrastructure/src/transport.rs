//! HTTP transport shared by every remote API client.
//!
//! Each request runs inside a `tracing` span carrying a fresh request id and is
//! raced against the caller's [`CancellationToken`]. Non-success responses are
//! turned into [`NextJobError::Server`] with the body's `detail` when present.

use std::time::Duration;

use nextjob_core::config::ApiConfig;
use nextjob_core::{NextJobError, Result};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, debug_span, warn};
use uuid::Uuid;

/// A configured HTTP client bound to the API base URL.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    client: Client,
    base_url: String,
}

impl ApiTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| NextJobError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts a request for `path`, relative to the base URL.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    /// Sends the request and decodes a JSON response body.
    pub async fn json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let body = self.call(request, cancel).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Sends the request and discards the response body.
    pub async fn execute(&self, request: RequestBuilder, cancel: &CancellationToken) -> Result<()> {
        self.call(request, cancel).await.map(|_| ())
    }

    /// Sends the request and returns the raw response body.
    pub async fn bytes(
        &self,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>> {
        self.call(request, cancel).await
    }

    async fn call(&self, request: RequestBuilder, cancel: &CancellationToken) -> Result<Vec<u8>> {
        if cancel.is_cancelled() {
            return Err(NextJobError::Cancelled);
        }

        let request = request.build().map_err(transport_error)?;
        let request_id = Uuid::new_v4();
        let span = debug_span!(
            "api_request",
            %request_id,
            method = %request.method(),
            path = %request.url().path(),
        );

        let exchange = async {
            debug!("Sending request");
            let response = self.client.execute(request).await.map_err(transport_error)?;
            let status = response.status();
            let body = response.bytes().await.map_err(transport_error)?;

            if status.is_success() {
                debug!(status = status.as_u16(), bytes = body.len(), "Request succeeded");
                Ok(body.to_vec())
            } else {
                let detail = error_detail(&body);
                warn!(status = status.as_u16(), ?detail, "Request rejected by server");
                Err(NextJobError::server(status.as_u16(), detail))
            }
        }
        .instrument(span);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(%request_id, "Request cancelled");
                Err(NextJobError::Cancelled)
            }
            result = exchange => result,
        }
    }
}

fn transport_error(err: reqwest::Error) -> NextJobError {
    if err.is_timeout() {
        NextJobError::network(format!("Request timed out: {err}"))
    } else {
        NextJobError::network(err.to_string())
    }
}

/// Extracts the `detail` member of an error body.
///
/// A string detail is returned as is; structured details (validation error
/// lists) are returned as compact JSON.
fn error_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

//! HTTP fetch primitives
//!
//! This module handles all HTTP requests made against the content source:
//! - Building the HTTP client with user agent and timeouts
//! - GET requests for JSON documents and raw bytes
//! - Classifying failures (timeout, transport, status, malformed payload)
//!
//! Nothing here retries; a failed request is reported once and left alone.

use crate::config::SourceConfig;
use crate::SieveError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Outcome of a network operation
///
/// Failures are values, not errors to propagate: a catalog that could not be
/// fetched and a catalog with no threads both end up contributing nothing.
#[derive(Debug)]
pub enum Fetched<T> {
    /// The request succeeded and the payload was understood
    Data(T),
    /// The request failed; the error says why
    Failed(SieveError),
}

impl<T> Fetched<T> {
    /// Returns true if data was fetched
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// Transforms the payload, keeping failures as they are
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Fetched<U> {
        match self {
            Self::Data(value) => Fetched::Data(f(value)),
            Self::Failed(error) => Fetched::Failed(error),
        }
    }

    /// Converts into a standard `Result`
    pub fn into_result(self) -> Result<T, SieveError> {
        match self {
            Self::Data(value) => Ok(value),
            Self::Failed(error) => Err(error),
        }
    }

    /// Discards the failure reason
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Data(value) => Some(value),
            Self::Failed(_) => None,
        }
    }
}

impl<T: Default> Fetched<T> {
    /// Returns the payload, or an empty value after logging the failure
    pub fn or_empty(self, context: &str) -> T {
        match self {
            Self::Data(value) => value,
            Self::Failed(error) => {
                tracing::warn!("{}: {}", context, error);
                T::default()
            }
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The content source configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &SourceConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns the response body
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Data(body)` |
/// | other status | `Failed(Status)` |
/// | timeout | `Failed(Timeout)` |
/// | connection or body error | `Failed(Http)` |
pub async fn fetch_bytes(client: &Client, url: &str) -> Fetched<Vec<u8>> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return Fetched::Failed(SieveError::from_transport(url, e)),
    };

    let status = response.status();
    if !status.is_success() {
        return Fetched::Failed(SieveError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    match response.bytes().await {
        Ok(body) => Fetched::Data(body.to_vec()),
        Err(e) => Fetched::Failed(SieveError::from_transport(url, e)),
    }
}

/// Fetches a URL and decodes the body as JSON
///
/// A body that does not fit `T` is reported as `Failed(Malformed)`.
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Fetched<T> {
    let body = match fetch_bytes(client, url).await {
        Fetched::Data(body) => body,
        Fetched::Failed(error) => return Fetched::Failed(error),
    };

    match serde_json::from_slice(&body) {
        Ok(value) => Fetched::Data(value),
        Err(source) => Fetched::Failed(SieveError::Malformed {
            url: url.to_string(),
            source,
        }),
    }
}

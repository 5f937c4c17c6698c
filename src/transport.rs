use crate::error::{HelixError, Result};
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use std::time::Duration;
use url::Url;

/// A fully built HTTP request, ready to hand to a [`Transport`].
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP verb
    pub method: Method,
    /// Complete target URL including the encoded query string
    pub url: Url,
    /// Headers to send, including auth headers
    pub headers: HeaderMap,
    /// JSON body for verbs that carry one
    pub body: Option<Vec<u8>>,
}

/// The raw result of sending a [`Request`], before any decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers (rate-limit counters live here)
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Vec<u8>,
}

/// The sole abstraction boundary to the network.
///
/// A transport sends one request and returns a raw response or a transport
/// error; it performs no decoding and no retries. Implementations must be
/// safe for concurrent use — the client issues independent calls from
/// multiple threads through the same transport.
///
/// Test doubles implement this to substitute canned responses; see the
/// integration tests for an example.
pub trait Transport: Send + Sync {
    /// Send the request, returning the raw response or a transport error.
    ///
    /// Failures must be reported as [`HelixError::RequestExecution`].
    fn send(&self, request: &Request) -> Result<RawResponse>;
}

/// Default [`Transport`] backed by a blocking reqwest client
/// with pooled connections and timeouts.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the default client settings
    pub fn new() -> Self {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(50)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");
        HttpTransport { client }
    }

    /// Create a transport wrapping a caller-configured reqwest client
    pub fn with_client(client: Client) -> Self {
        HttpTransport { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &Request) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());

        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(HelixError::request_execution)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .map_err(HelixError::request_execution)?
            .to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

use std::borrow::Cow;
use std::io::Read;
use std::time::Duration;
use log::{debug, error};
use serde_json::Value;
use thiserror::Error;

/// Error types that can occur when no response could be obtained
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The request never produced a response (timeout, refused, DNS, ...)
    #[error("HTTP request error: {0}")]
    RequestError(String),

    /// A response was started but its body could not be read
    #[error("Failed to read response body: {0}")]
    ReadError(String),
}

/// A response that made it back from the server, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// True for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, for log messages
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decode the body as JSON, `None` if it isn't valid JSON
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// A trait for HTTP client implementations
///
/// Implementations return `Ok` for every response received, including
/// 4xx/5xx. `Err` is reserved for transport level failures.
pub trait HttpClient: Send + std::fmt::Debug {
    /// Send a GET request
    fn get(&self, url: &str) -> Result<HttpResponse, HttpClientError>;

    /// Send a POST request without a body
    fn post(&self, url: &str) -> Result<HttpResponse, HttpClientError>;
}

/// An HTTP client implementation using ureq
#[derive(Clone, Debug)]
pub struct UreqHttpClient {
    timeout: Duration,
}

impl UreqHttpClient {
    /// Create a new HTTP client with the specified timeout
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    fn complete(&self, url: &str, result: Result<ureq::Response, ureq::Error>) -> Result<HttpResponse, HttpClientError> {
        let response = match result {
            Ok(resp) => resp,
            // ureq reports 4xx/5xx as errors, but the server did answer
            Err(ureq::Error::Status(code, resp)) => {
                debug!("{} answered with status {}", url, code);
                resp
            }
            Err(ureq::Error::Transport(e)) => {
                error!("Request to {} failed: {}", url, e);
                return Err(HttpClientError::RequestError(e.to_string()));
            }
        };

        let status = response.status();
        let mut body = Vec::new();
        if let Err(e) = response.into_reader().read_to_end(&mut body) {
            error!("Failed to read response body from {}: {}", url, e);
            return Err(HttpClientError::ReadError(e.to_string()));
        }

        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for UreqHttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse, HttpClientError> {
        debug!("GET request to {}", url);
        let result = ureq::get(url).timeout(self.timeout).call();
        self.complete(url, result)
    }

    fn post(&self, url: &str) -> Result<HttpResponse, HttpClientError> {
        debug!("POST request to {}", url);
        let result = ureq::post(url).timeout(self.timeout).call();
        self.complete(url, result)
    }
}

/// Create a new HTTP client using the default implementation
pub fn new_http_client(timeout_secs: u64) -> Box<dyn HttpClient> {
    Box::new(UreqHttpClient::new(timeout_secs))
}

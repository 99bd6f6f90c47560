//! Raw response type returned by a [`Transport`](crate::transport::Transport).

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::headers;

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const NOT_FOUND: StatusCode = StatusCode(404);

    /// Check if the status code indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// Check if the code is one an HTTP response can carry at all.
    pub fn is_valid(&self) -> bool {
        hyper::StatusCode::from_u16(self.0).is_ok()
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::OK
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

impl From<hyper::StatusCode> for StatusCode {
    fn from(code: hyper::StatusCode) -> Self {
        StatusCode(code.as_u16())
    }
}

/// Raw HTTP response from a function, before any decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunctionResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// HTTP headers.
    pub headers: HashMap<String, String>,
    /// Response body. Empty when the function returned none.
    pub body: Bytes,
}

impl FunctionResponse {
    /// Create a new FunctionResponse with the given status code.
    pub fn new(status: impl Into<StatusCode>) -> Self {
        Self {
            status: status.into(),
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Create an OK response.
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// Add a header to the response.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        headers::insert(&mut self.headers, key.into(), value.into());
        self
    }

    /// Set the response body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header value, ignoring the case of `key`.
    pub fn get_header(&self, key: &str) -> Option<&str> {
        headers::get(&self.headers, key)
    }

    /// Get the body as text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Parse the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

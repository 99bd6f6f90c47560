//! Error types for function invocation.

use bytes::Bytes;
use std::collections::HashMap;

use crate::http::StatusCode;

/// Boxed error carried by transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of the underlying transport to deliver a well-formed HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be turned into a wire request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Connection, TLS, timeout, or I/O failure while exchanging the request.
    #[error("request failed: {0}")]
    Request(#[source] BoxError),

    /// The peer answered with something that is not a usable HTTP response.
    #[error("bad server response: {0}")]
    BadResponse(String),
}

impl TransportError {
    /// Wrap any error as a request failure.
    pub fn request(err: impl Into<BoxError>) -> Self {
        TransportError::Request(err.into())
    }
}

/// Errors returned by [`FunctionsClient`](crate::FunctionsClient).
#[derive(Debug, thiserror::Error)]
pub enum FunctionsError {
    /// The transport failed before a classifiable response was available.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The function answered with a status outside 200..300.
    #[error("Edge Function returned a non-2xx status code: {status}")]
    Http { status: StatusCode, body: Bytes },

    /// The function answered 2xx but flagged `x-relay-error: true`.
    #[error("Relay Error invoking the Edge Function")]
    Relay {
        status: StatusCode,
        headers: HashMap<String, String>,
        body: Bytes,
    },

    /// The response body was not valid JSON for the requested type.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The base URL cannot have function names appended to it.
    #[error("invalid functions url: {0}")]
    InvalidUrl(String),
}

impl FunctionsError {
    /// The response status, for errors produced after a response arrived.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FunctionsError::Http { status, .. } | FunctionsError::Relay { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// The raw response body, for errors produced after a response arrived.
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            FunctionsError::Http { body, .. } | FunctionsError::Relay { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, FunctionsError::Transport(_))
    }

    pub fn is_relay(&self) -> bool {
        matches!(self, FunctionsError::Relay { .. })
    }
}

impl From<url::ParseError> for FunctionsError {
    fn from(err: url::ParseError) -> Self {
        FunctionsError::InvalidUrl(err.to_string())
    }
}

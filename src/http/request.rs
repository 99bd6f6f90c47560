//! Outgoing request type handed to a [`Transport`](crate::transport::Transport).

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::headers;

/// HTTP method enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    #[default]
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    /// The method name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for hyper::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => hyper::Method::GET,
            Method::Post => hyper::Method::POST,
            Method::Put => hyper::Method::PUT,
            Method::Delete => hyper::Method::DELETE,
            Method::Patch => hyper::Method::PATCH,
            Method::Head => hyper::Method::HEAD,
            Method::Options => hyper::Method::OPTIONS,
        }
    }
}

/// A fully resolved function invocation, ready for the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL of the function.
    pub url: String,
    /// HTTP headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Bytes>,
}

impl FunctionRequest {
    /// Get a header value, ignoring the case of `key`.
    pub fn get_header(&self, key: &str) -> Option<&str> {
        headers::get(&self.headers, key)
    }

    /// Get the body as text if present.
    pub fn text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).to_string())
    }

    /// Parse the body as JSON if present.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.body.as_ref().map(|b| serde_json::from_slice(b))
    }
}

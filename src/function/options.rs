//! Per-invocation options: method, headers, and an encoded body.

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;

use crate::function::error::FunctionsError;
use crate::http::{headers, Method};

pub const CONTENT_TYPE: &str = "Content-Type";

/// Body of a function invocation, tagged by how it should be sent.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Sent as UTF-8 with `text/plain`.
    Text(String),
    /// Sent unchanged with `application/octet-stream`.
    Bytes(Bytes),
    /// Sent as serialized JSON with `application/json`.
    Json(serde_json::Value),
}

impl Payload {
    /// Capture any serializable value as a JSON payload.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Payload::Json)
    }

    /// Content type derived from the payload kind.
    pub fn content_type(&self) -> &'static str {
        match self {
            Payload::Text(_) => "text/plain",
            Payload::Bytes(_) => "application/octet-stream",
            Payload::Json(_) => "application/json",
        }
    }

    /// Encode the payload into the bytes sent on the wire.
    pub fn into_bytes(self) -> Bytes {
        match self {
            Payload::Text(text) => Bytes::from(text),
            Payload::Bytes(bytes) => bytes,
            // A Value has only string map keys, so serialization cannot fail.
            Payload::Json(value) => Bytes::from(value.to_string()),
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

/// Options for a single function invocation.
///
/// Headers set explicitly always win over the `Content-Type` derived from
/// the body, whichever was attached first.
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    method: Option<Method>,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
    /// Set while the `Content-Type` header came from the body, not the caller.
    derived_content_type: bool,
}

impl InvokeOptions {
    /// Empty options: no headers, no body, method left to the default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from all parts at once.
    pub fn from_parts(
        headers: HashMap<String, String>,
        body: Option<Payload>,
        method: Option<Method>,
    ) -> Self {
        let options = Self {
            method,
            headers,
            body: None,
            derived_content_type: false,
        };
        match body {
            Some(payload) => options.body(payload),
            None => options,
        }
    }

    /// Options carrying only a body.
    pub fn with_body(payload: impl Into<Payload>) -> Self {
        Self::new().body(payload)
    }

    /// Options carrying a serializable value as a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, FunctionsError> {
        let payload = Payload::json(value).map_err(FunctionsError::Encode)?;
        Ok(Self::with_body(payload))
    }

    /// Set the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a header, replacing any same-named header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_header(key.into(), value.into());
        self
    }

    /// Add several headers.
    pub fn headers<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.insert_header(key.into(), value.into());
        }
        self
    }

    /// Attach a body, deriving `Content-Type` unless the caller set one.
    ///
    /// Attaching another body replaces both the bytes and any derived type.
    pub fn body(mut self, payload: impl Into<Payload>) -> Self {
        let payload = payload.into();
        if self.derived_content_type || !headers::contains(&self.headers, CONTENT_TYPE) {
            headers::insert(
                &mut self.headers,
                CONTENT_TYPE.to_string(),
                payload.content_type().to_string(),
            );
            self.derived_content_type = true;
        }
        self.body = Some(payload.into_bytes());
        self
    }

    fn insert_header(&mut self, key: String, value: String) {
        if key.eq_ignore_ascii_case(CONTENT_TYPE) {
            self.derived_content_type = false;
        }
        headers::insert(&mut self.headers, key, value);
    }

    /// The method chosen for this call, if any.
    pub fn get_method(&self) -> Option<Method> {
        self.method
    }

    /// The method to dispatch with, POST when none was chosen.
    pub fn method_or_default(&self) -> Method {
        self.method.unwrap_or_default()
    }

    /// All headers, including a derived `Content-Type`.
    pub fn get_headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Get a header value, ignoring the case of `key`.
    pub fn get_header(&self, key: &str) -> Option<&str> {
        headers::get(&self.headers, key)
    }

    /// The encoded body, if one was attached.
    pub fn body_bytes(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Option<Method>, HashMap<String, String>, Option<Bytes>) {
        (self.method, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn string_body() {
        let options = InvokeOptions::with_body("string value");
        assert_eq!(options.get_header(CONTENT_TYPE), Some("text/plain"));
        assert_eq!(
            options.body_bytes().map(|b| b.as_ref()),
            Some(&b"string value"[..])
        );
    }

    #[test]
    fn data_body() {
        let options = InvokeOptions::with_body(b"binary value".to_vec());
        assert_eq!(
            options.get_header(CONTENT_TYPE),
            Some("application/octet-stream")
        );
        assert_eq!(
            options.body_bytes().map(|b| b.as_ref()),
            Some(&b"binary value"[..])
        );
    }

    #[test]
    fn encodable_body() {
        #[derive(Serialize)]
        struct Body {
            value: String,
        }

        let options = InvokeOptions::json(&Body {
            value: "value".to_string(),
        })
        .unwrap();

        assert_eq!(options.get_header(CONTENT_TYPE), Some("application/json"));
        let sent: serde_json::Value =
            serde_json::from_slice(options.body_bytes().unwrap()).unwrap();
        assert_eq!(sent, serde_json::json!({ "value": "value" }));
    }

    #[test]
    fn multipart_form_data_header_wins() {
        let content_type = "multipart/form-data; boundary=Boundary-7MA4YWxkTrZu0gW";
        let options = InvokeOptions::from_parts(
            HashMap::from([(CONTENT_TYPE.to_string(), content_type.to_string())]),
            Some(Payload::from(b"binary value".to_vec())),
            None,
        );

        assert_eq!(options.get_header(CONTENT_TYPE), Some(content_type));
        assert!(options.body_bytes().is_some());
    }

    #[test]
    fn explicit_header_wins_regardless_of_order_or_case() {
        let options = InvokeOptions::with_body("text").header("content-type", "text/markdown");

        assert_eq!(options.get_headers().len(), 1);
        assert_eq!(options.get_header(CONTENT_TYPE), Some("text/markdown"));

        let options = InvokeOptions::new()
            .header("content-type", "application/cbor")
            .body(serde_json::json!({ "a": 1 }));

        assert_eq!(options.get_headers().len(), 1);
        assert_eq!(options.get_header(CONTENT_TYPE), Some("application/cbor"));
    }

    #[test]
    fn replacing_body_rederives_content_type() {
        let options = InvokeOptions::with_body("text").body(vec![0u8, 1, 2]);
        assert_eq!(
            options.get_header(CONTENT_TYPE),
            Some("application/octet-stream")
        );
        assert_eq!(options.body_bytes().map(|b| b.as_ref()), Some(&[0u8, 1, 2][..]));

        let options = options.body(serde_json::json!({ "a": 1 }));
        assert_eq!(options.get_header(CONTENT_TYPE), Some("application/json"));
        assert_eq!(options.get_headers().len(), 1);
    }

    #[test]
    fn replacing_body_keeps_explicit_content_type() {
        let options = InvokeOptions::with_body("text")
            .header("content-type", "text/csv")
            .body(vec![0u8, 1, 2]);
        assert_eq!(options.get_header(CONTENT_TYPE), Some("text/csv"));

        let options = InvokeOptions::new()
            .header(CONTENT_TYPE, "application/cbor")
            .body("first")
            .body(vec![9u8]);
        assert_eq!(options.get_header(CONTENT_TYPE), Some("application/cbor"));
    }

    #[test]
    fn empty_options() {
        let options = InvokeOptions::new();
        assert!(options.get_headers().is_empty());
        assert!(options.body_bytes().is_none());
        assert_eq!(options.get_method(), None);
        assert_eq!(options.method_or_default(), Method::Post);
    }

    #[test]
    fn unserializable_value_is_reported() {
        let mut map = std::collections::BTreeMap::new();
        map.insert((1, 2), "tuple keys are not JSON object keys");

        let err = InvokeOptions::json(&map).unwrap_err();
        assert!(matches!(err, FunctionsError::Encode(_)));
    }
}

//! Default transport built on hyper_util's legacy client.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::Transport;
use crate::function::error::TransportError;
use crate::http::{FunctionRequest, FunctionResponse, StatusCode};

type HyperClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// HTTP/1.1 transport over rustls, accepting both `https` and `http` URLs.
///
/// Certificates are verified against the bundled webpki roots. Timeouts are
/// not imposed here; wrap the transport if a deadline is needed.
#[derive(Clone)]
pub struct HyperTransport {
    client: HyperClient,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport").finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a transport using the ring crypto provider.
    pub fn new() -> Result<Self, TransportError> {
        let connector = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())
            .map_err(TransportError::request)?
            .https_or_http()
            .enable_http1()
            .build();

        Ok(Self::with_connector(connector))
    }

    /// Create a transport over a caller-built connector, e.g. with custom roots.
    pub fn with_connector(connector: HttpsConnector<HttpConnector>) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self { client }
    }
}

#[async_trait]
impl Transport for HyperTransport {
    async fn fetch(&self, request: FunctionRequest) -> Result<FunctionResponse, TransportError> {
        let mut builder = hyper::Request::builder()
            .method(hyper::Method::from(request.method))
            .uri(request.url.as_str());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = Full::new(request.body.unwrap_or_default());
        let wire_request = builder
            .body(body)
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let response = self.client.request(wire_request).await.map_err(|e| {
            debug!("Request to {} failed: {}", request.url, e);
            TransportError::request(e)
        })?;

        let status = StatusCode::from(response.status());

        let mut headers: HashMap<String, String> = HashMap::new();
        for (name, value) in response.headers() {
            let Ok(value) = value.to_str() else {
                warn!("Dropping non-ASCII response header: {}", name);
                continue;
            };
            headers
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(TransportError::request)?
            .to_bytes();

        Ok(FunctionResponse {
            status,
            headers,
            body,
        })
    }
}

//! The function invocation client.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use crate::function::config::FunctionsConfig;
use crate::function::error::{FunctionsError, TransportError};
use crate::function::options::InvokeOptions;
use crate::http::{headers, FunctionRequest, FunctionResponse};
use crate::transport::{HyperTransport, Transport};

/// Value of the client identification header.
pub const CLIENT_INFO: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const CLIENT_INFO_HEADER: &str = "X-Client-Info";
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const RELAY_ERROR_HEADER: &str = "x-relay-error";

/// Client for invoking functions hosted under a common base URL.
///
/// The client is meant to be built once and shared. Persistent headers sit
/// behind a lock; every invocation works on a snapshot taken before the
/// request is built, so [`set_auth`](Self::set_auth) never tears an
/// in-flight request.
pub struct FunctionsClient {
    /// Base URL, validated to accept appended path segments.
    url: Url,
    /// Headers sent with every invocation.
    headers: RwLock<HashMap<String, String>>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for FunctionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionsClient")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

impl FunctionsClient {
    /// Create a client using the default [`HyperTransport`].
    pub fn new(config: FunctionsConfig) -> Result<Self, FunctionsError> {
        let transport = HyperTransport::new()?;
        Self::with_transport(config, transport)
    }

    /// Create a client with a custom transport.
    pub fn with_transport(
        config: FunctionsConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self, FunctionsError> {
        Self::with_shared_transport(config, Arc::new(transport))
    }

    /// Create a client over a transport shared with other clients.
    pub fn with_shared_transport(
        config: FunctionsConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, FunctionsError> {
        let url = Url::parse(&config.url)?;
        if url.cannot_be_a_base() {
            return Err(FunctionsError::InvalidUrl(format!(
                "'{}' cannot be used as a base url",
                config.url
            )));
        }

        let mut persistent = config.headers;
        headers::insert(
            &mut persistent,
            CLIENT_INFO_HEADER.to_string(),
            CLIENT_INFO.to_string(),
        );

        Ok(Self {
            url,
            headers: RwLock::new(persistent),
            transport,
        })
    }

    /// The base URL functions are resolved against.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Snapshot of the headers sent with every invocation.
    pub async fn headers(&self) -> HashMap<String, String> {
        self.headers.read().await.clone()
    }

    /// Send `Authorization: Bearer <token>` with all later invocations.
    pub async fn set_auth(&self, token: impl AsRef<str>) {
        let value = format!("Bearer {}", token.as_ref());
        let mut persistent = self.headers.write().await;
        headers::insert(&mut persistent, AUTHORIZATION_HEADER.to_string(), value);
    }

    /// Invoke a function and decode the successful response with `decode`.
    ///
    /// Errors returned by `decode` are passed through untouched; invocation
    /// failures reach the caller through `E: From<FunctionsError>`.
    pub async fn invoke_with<R, E, D>(
        &self,
        function_name: &str,
        options: InvokeOptions,
        decode: D,
    ) -> Result<R, E>
    where
        D: FnOnce(FunctionResponse) -> Result<R, E>,
        E: From<FunctionsError>,
    {
        let response = self.raw_invoke(function_name, options).await?;
        decode(response)
    }

    /// Invoke a function and parse its response body as JSON.
    pub async fn invoke_json<T: DeserializeOwned>(
        &self,
        function_name: &str,
        options: InvokeOptions,
    ) -> Result<T, FunctionsError> {
        self.invoke_with(function_name, options, |response| {
            response.json().map_err(FunctionsError::Decode)
        })
        .await
    }

    /// Invoke a function, discarding its response body.
    pub async fn invoke(
        &self,
        function_name: &str,
        options: InvokeOptions,
    ) -> Result<(), FunctionsError> {
        self.invoke_with(function_name, options, |_| Ok(())).await
    }

    async fn raw_invoke(
        &self,
        function_name: &str,
        options: InvokeOptions,
    ) -> Result<FunctionResponse, FunctionsError> {
        let (method, option_headers, body) = options.into_parts();
        let method = method.unwrap_or_default();
        let url = self.function_url(function_name)?;

        let headers = {
            let persistent = self.headers.read().await;
            headers::merge(persistent.clone(), &option_headers)
        };

        let request = FunctionRequest {
            method,
            url: url.to_string(),
            headers,
            body,
        };

        debug!("Invoking function '{}': {} {}", function_name, method, request.url);

        let response = self.transport.fetch(request).await.map_err(|e| {
            warn!("Function '{}' transport error: {}", function_name, e);
            e
        })?;

        classify(response).inspect_err(|e| {
            warn!("Function '{}' failed: {}", function_name, e);
        })
    }

    /// Resolve a function name against the base URL.
    ///
    /// Leading and trailing slashes are ignored. Empty, `.` and `..`
    /// segments are rejected since they would address something other than
    /// a function below the base.
    fn function_url(&self, function_name: &str) -> Result<Url, FunctionsError> {
        let segments: Vec<&str> = function_name.trim_matches('/').split('/').collect();
        if segments
            .iter()
            .any(|segment| segment.is_empty() || *segment == "." || *segment == "..")
        {
            return Err(FunctionsError::InvalidUrl(format!(
                "'{}' is not a valid function name",
                function_name
            )));
        }

        let mut url = self.url.clone();
        // Construction rejects urls that cannot be a base, so this always applies.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

/// Sort a raw response into success or one of the invocation errors.
///
/// The status check runs first: a non-2xx response is an HTTP error even if
/// it also carries the relay header.
fn classify(response: FunctionResponse) -> Result<FunctionResponse, FunctionsError> {
    if !response.status.is_valid() {
        return Err(TransportError::BadResponse(format!(
            "invalid status code {}",
            response.status
        ))
        .into());
    }

    if !response.status.is_success() {
        return Err(FunctionsError::Http {
            status: response.status,
            body: response.body,
        });
    }

    if response.get_header(RELAY_ERROR_HEADER) == Some("true") {
        return Err(FunctionsError::Relay {
            status: response.status,
            headers: response.headers,
            body: response.body,
        });
    }

    Ok(response)
}

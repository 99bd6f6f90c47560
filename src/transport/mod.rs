//! Pluggable transport performing the actual HTTP exchange.
//!
//! The client never talks to the network itself. It hands a
//! [`FunctionRequest`] to a [`Transport`] and classifies whatever comes back.
//! [`HyperTransport`] is the default; tests and hosts with their own HTTP
//! stack plug in a closure through [`fetch_fn`].

mod hyper;

pub use self::hyper::HyperTransport;

use async_trait::async_trait;
use std::future::Future;

use crate::function::error::TransportError;
use crate::http::{FunctionRequest, FunctionResponse};

/// A fetch-like primitive: one request in, one raw response out.
///
/// Implementations report any status code as a response. Only failures to
/// obtain a response at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, request: FunctionRequest) -> Result<FunctionResponse, TransportError>;
}

/// A [`Transport`] backed by an async closure. Created by [`fetch_fn`].
#[derive(Clone)]
pub struct FetchFn<F> {
    f: F,
}

impl<F> std::fmt::Debug for FetchFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchFn").finish_non_exhaustive()
    }
}

/// Turn an async closure into a [`Transport`].
///
/// ```
/// use functions_client::prelude::*;
///
/// let transport = fetch_fn(|request: FunctionRequest| async move {
///     Ok::<_, TransportError>(FunctionResponse::ok().body(request.url))
/// });
/// # let _ = transport;
/// ```
pub fn fetch_fn<F, Fut>(f: F) -> FetchFn<F>
where
    F: Fn(FunctionRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FunctionResponse, TransportError>> + Send,
{
    FetchFn { f }
}

#[async_trait]
impl<F, Fut> Transport for FetchFn<F>
where
    F: Fn(FunctionRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FunctionResponse, TransportError>> + Send,
{
    async fn fetch(&self, request: FunctionRequest) -> Result<FunctionResponse, TransportError> {
        (self.f)(request).await
    }
}

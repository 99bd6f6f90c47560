//! # Functions Client
//!
//! A client for invoking remotely hosted serverless functions over HTTPS.
//! A function is addressed by name under a common base URL; the client turns
//! a logical "invoke" call into an HTTP request, hands it to a pluggable
//! fetch-like [`Transport`], and sorts the raw response into success or one
//! of three failure kinds.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   InvokeOptions   ┌─────────────────────────────────┐
//! │ application  │ ────────────────▶ │         FunctionsClient         │
//! └──────────────┘                   │  base url + persistent headers  │
//!        ▲                           └─────────────────────────────────┘
//!        │ decode(FunctionResponse)          │ FunctionRequest
//!        │                                   ▼
//! ┌──────────────┐  FunctionResponse ┌─────────────────────────────────┐
//! │   classify   │ ◀──────────────── │   Transport (HyperTransport)    │
//! └──────────────┘                   └─────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use functions_client::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Greeting {
//!     message: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), FunctionsError> {
//!     let config = FunctionsConfig::new("https://project.supabase.co/functions/v1")
//!         .apikey("anon-key");
//!     let client = FunctionsClient::new(config)?;
//!     client.set_auth("user-jwt").await;
//!
//!     let options = InvokeOptions::json(&serde_json::json!({ "name": "Functions" }))?;
//!     let greeting: Greeting = client.invoke_json("hello_world", options).await?;
//!     println!("{}", greeting.message);
//!     Ok(())
//! }
//! ```
//!
//! ## Outcomes
//!
//! 1. The transport failed or returned a malformed response:
//!    [`FunctionsError::Transport`].
//! 2. The status is outside `200..300`: [`FunctionsError::Http`], with the
//!    raw body kept for inspection.
//! 3. The status is 2xx but the response carries `x-relay-error: true`:
//!    [`FunctionsError::Relay`].
//! 4. Otherwise the response is handed to the decoder.

pub mod function;
pub mod http;
pub mod transport;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::function::{
        FunctionsClient, FunctionsConfig, FunctionsError, InvokeOptions, Payload, TransportError,
    };
    pub use crate::http::{FunctionRequest, FunctionResponse, Method, StatusCode};
    pub use crate::transport::{fetch_fn, HyperTransport, Transport};
    pub use async_trait::async_trait;
}

// Re-export for convenience
pub use function::client::CLIENT_INFO;
pub use function::{
    FunctionsClient, FunctionsConfig, FunctionsError, InvokeOptions, Payload, TransportError,
};
pub use http::{FunctionRequest, FunctionResponse, Method, StatusCode};
pub use transport::{fetch_fn, HyperTransport, Transport};

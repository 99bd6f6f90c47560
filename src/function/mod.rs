//! Function invocation: options, client, configuration, and errors.

pub mod client;
pub mod config;
pub mod error;
pub mod options;

pub use client::FunctionsClient;
pub use config::FunctionsConfig;
pub use error::{FunctionsError, TransportError};
pub use options::{InvokeOptions, Payload};

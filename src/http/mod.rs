//! Plain-data HTTP types exchanged between the client and its transport.

pub mod headers;
mod request;
mod response;

pub use request::{FunctionRequest, Method};
pub use response::{FunctionResponse, StatusCode};

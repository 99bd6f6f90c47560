//! Client configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::http::headers;

/// Configuration for a [`FunctionsClient`](crate::FunctionsClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionsConfig {
    /// Base URL that function names are appended to,
    /// e.g. `https://<project>.supabase.co/functions/v1`.
    pub url: String,
    /// Headers sent with every invocation.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl FunctionsConfig {
    /// Create a new config for the given base URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Add a header sent with every invocation.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        headers::insert(&mut self.headers, key.into(), value.into());
        self
    }

    /// Set the project API key header.
    pub fn apikey(self, key: impl Into<String>) -> Self {
        self.header("apikey", key)
    }
}

//! Invoke a function from the command line environment.
//!
//! ```text
//! FUNCTIONS_URL=http://localhost:54321/functions/v1 \
//! FUNCTIONS_APIKEY=... FUNCTIONS_TOKEN=... \
//! cargo run --example invoke -- hello_world '{"name":"Functions"}'
//! ```

use functions_client::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let url = std::env::var("FUNCTIONS_URL")
        .unwrap_or_else(|_| "http://localhost:54321/functions/v1".to_string());

    let mut args = std::env::args().skip(1);
    let function_name = args.next().unwrap_or_else(|| "hello_world".to_string());
    let body = args.next();

    let mut config = FunctionsConfig::new(url);
    if let Ok(key) = std::env::var("FUNCTIONS_APIKEY") {
        config = config.apikey(key);
    }

    let client = FunctionsClient::new(config)?;
    if let Ok(token) = std::env::var("FUNCTIONS_TOKEN") {
        client.set_auth(token).await;
    }

    let options = match body {
        Some(raw) => match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => InvokeOptions::with_body(value),
            Err(_) => InvokeOptions::with_body(raw),
        },
        None => InvokeOptions::new(),
    };

    let result = client
        .invoke_with(&function_name, options, |response| {
            Ok::<_, FunctionsError>(response)
        })
        .await;

    match result {
        Ok(response) => {
            tracing::info!("Function '{}' returned {}", function_name, response.status);
            println!("{}", response.text());
        }
        Err(FunctionsError::Http { status, body }) => {
            tracing::error!("Function '{}' returned {}", function_name, status);
            println!("{}", String::from_utf8_lossy(&body));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

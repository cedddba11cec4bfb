//! Shared HTTP client construction for outbound provider calls

use anyhow::{Context, Result};
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

/// Plain client; request timeouts are left at the reqwest defaults
pub fn client(user_agent: &str) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .build()
        .with_context(|| "Failed to create HTTP client")
}

/// Client that retries transient failures (connect errors, 5xx, 429) with
/// exponential backoff
pub fn retrying_client(user_agent: &str, max_retries: u32) -> Result<ClientWithMiddleware> {
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);
    Ok(ClientBuilder::new(client(user_agent)?)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

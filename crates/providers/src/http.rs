use std::time::Duration;

use reqwest::Client;

use crate::error::ProviderFault;

const USER_AGENT: &str = concat!("deskmate/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client for the weather and knowledge services.
pub fn build_http_client(timeout: Duration) -> Result<Client, ProviderFault> {
    let client = Client::builder()
        .pool_max_idle_per_host(8)
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

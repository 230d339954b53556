use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const USER_AGENT: &str = concat!("search-scout/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// One GET, full-body wait, no retries. Non-2xx is an error; an error
/// page body is never handed to the extractor.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let resp = client.get(url).send().await.map_err(|e| FetchError::Transport {
        url: url.to_string(),
        source: e,
    })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status { url: url.to_string(), status });
    }

    resp.text().await.map_err(|e| FetchError::Transport {
        url: url.to_string(),
        source: e,
    })
}

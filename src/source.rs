//! One-shot load of the radar entries document.
//!
//! The document is fetched once before the server starts reading stdin.
//! Any failure here is fatal: the server never runs without entries.

use std::time::Duration;

use serde_json::Value;

use crate::config::ServerConfig;
use crate::radar::{Radar, RadarEntry};

/// `User-Agent` sent with the fetch.
pub const USER_AGENT: &str = concat!("radar-mcp-server/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("radar entries document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("radar entries document did not contain a JSON array")]
    NotArray,
}

/// Fetch the configured document and wrap it as a [`Radar`].
pub async fn load_radar(config: &ServerConfig) -> Result<Radar, SourceError> {
    let entries = fetch_entries(&config.entries_url, config.fetch_timeout).await?;
    Ok(Radar::new(config.entries_url.clone(), entries))
}

/// HTTP client settings used for the fetch.
pub fn client_builder(timeout: Duration) -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
}

/// Single GET, no retries.
pub async fn fetch_entries(url: &str, timeout: Duration) -> Result<Vec<RadarEntry>, SourceError> {
    let client = client_builder(timeout).build().map_err(|source| SourceError::Http {
        url: url.to_string(),
        source,
    })?;
    fetch_entries_with(&client, url).await
}

/// Same as [`fetch_entries`], on a caller-built client.
pub async fn fetch_entries_with(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<RadarEntry>, SourceError> {
    let http = |source: reqwest::Error| SourceError::Http {
        url: url.to_string(),
        source,
    };

    tracing::debug!(url, "Fetching radar entries");
    let response = client.get(url).send().await.map_err(http)?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status,
        });
    }

    // text() honors the charset in Content-Type, defaulting to UTF-8
    let body = response.text().await.map_err(http)?;
    parse_entries(&body)
}

/// Parse an entries document. Array elements that are not objects are dropped.
pub fn parse_entries(body: &str) -> Result<Vec<RadarEntry>, SourceError> {
    let items = match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => items,
        _ => return Err(SourceError::NotArray),
    };

    let total = items.len();
    let entries: Vec<RadarEntry> = items.into_iter().filter_map(RadarEntry::from_value).collect();
    if entries.len() < total {
        tracing::warn!(
            dropped = total - entries.len(),
            "Ignoring non-object elements in radar entries document"
        );
    }
    Ok(entries)
}

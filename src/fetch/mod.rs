mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use crate::error::FeedError;
use reqwest::header::{ACCEPT, HeaderValue};
use tracing::debug;

/// GETs `url` with `Accept: application/json` and parses the body.
///
/// Non-2xx statuses become [`FeedError::Status`]; bodies that are not JSON
/// become [`FeedError::InvalidJson`].
#[tracing::instrument(skip(client), fields(url = %url))]
pub async fn fetch_json<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
) -> Result<serde_json::Value, FeedError> {
    let parsed = url.parse::<reqwest::Url>().map_err(|e| FeedError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let mut req = reqwest::Request::new(reqwest::Method::GET, parsed);
    req.headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));

    let resp = client.execute(req).await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FeedError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let bytes = resp.bytes().await?;
    debug!(bytes = bytes.len(), "Response body received");

    Ok(serde_json::from_slice(&bytes)?)
}

use crate::error::FeedError;
use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

pub const X_API_KEY: &str = "X-API-Key";

/// An [`HttpClient`] wrapper that injects an API key as an HTTP header.
///
/// The header name and value are validated once at construction so every
/// request can be decorated without re-parsing.
pub struct ApiKey<C> {
    inner: C,
    header_name: HeaderName,
    value: HeaderValue,
}

impl<C> ApiKey<C> {
    pub fn new(inner: C, header_name: &str, key: &str) -> Result<Self, FeedError> {
        let header_name = HeaderName::from_bytes(header_name.as_bytes())
            .map_err(|e| FeedError::InvalidHeader(format!("{header_name}: {e}")))?;
        let mut value = HeaderValue::from_str(key)
            .map_err(|e| FeedError::InvalidHeader(format!("{header_name} value: {e}")))?;
        value.set_sensitive(true);

        Ok(Self {
            inner,
            header_name,
            value,
        })
    }

    /// Uses the `X-API-Key` header expected by the earthquakes backend.
    pub fn x_api_key(inner: C, key: &str) -> Result<Self, FeedError> {
        Self::new(inner, X_API_KEY, key)
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header_name.clone(), self.value.clone());
        self.inner.execute(req).await
    }
}

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::{ClientConfig, ResponseShape};
use crate::error::FeedError;
use crate::fetch::auth::ApiKey;
use crate::fetch::{BasicClient, fetch_json};
use crate::model::RawFeature;
use crate::normalize::{EarthquakeList, normalize_payload};
use crate::parser::{parse_detail, parse_payload};
use crate::services::earthquake_api::EarthquakeApi;

/// Client for the earthquakes backend (`/api/getEarthquakes`).
///
/// List requests carry the configured `X-API-Key`; detail requests go to
/// arbitrary upstream URLs and are sent without credentials.
pub struct EarthquakesApiClient {
    list_client: ApiKey<BasicClient>,
    detail_client: BasicClient,
    list_url: String,
    response_shape: ResponseShape,
}

impl EarthquakesApiClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the API key is
    /// not a valid header value.
    pub fn new(config: &ClientConfig) -> Result<Self, FeedError> {
        let list_client = ApiKey::x_api_key(
            BasicClient::with_timeout(config.timeout_secs)?,
            &config.api_key,
        )?;

        Ok(Self {
            list_client,
            detail_client: BasicClient::with_timeout(config.timeout_secs)?,
            list_url: config.list_url(),
            response_shape: config.response_shape,
        })
    }

    pub fn list_url(&self) -> &str {
        &self.list_url
    }
}

#[async_trait]
impl EarthquakeApi for EarthquakesApiClient {
    #[tracing::instrument(skip(self))]
    async fn list_earthquakes(&self) -> Result<EarthquakeList, FeedError> {
        let body = fetch_json(&self.list_client, &self.list_url).await?;
        let payload = parse_payload(&body, self.response_shape)?;
        let list = normalize_payload(&payload);

        info!(
            url = %self.list_url,
            shape = %self.response_shape,
            count = list.len(),
            "Earthquake list fetched"
        );
        Ok(list)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_detail(&self, detail_url: &str) -> Option<RawFeature> {
        match fetch_json(&self.detail_client, detail_url).await {
            Ok(body) => parse_detail(&body),
            Err(e) => {
                warn!(error = %e, "Detail fetch failed, no data available");
                None
            }
        }
    }
}

use tracing::info;

use crate::config::ResponseShape;
use crate::error::FeedError;
use crate::fetch::{BasicClient, fetch_json};
use crate::filter::{MagnitudeFloor, RecencyWindow};
use crate::model::NormalizedRecord;
use crate::normalize::normalize_features;
use crate::parser::{FeedPayload, parse_payload};

pub const USGS_BASE_URL: &str = "https://earthquake.usgs.gov";

const USGS_TIMEOUT_SECS: u64 = 10;

/// Reads the public USGS GeoJSON summary feeds.
pub struct UsgsFeedClient {
    client: BasicClient,
    base_url: String,
}

impl UsgsFeedClient {
    pub fn new() -> Result<Self, FeedError> {
        Self::with_base_url(USGS_BASE_URL)
    }

    /// Points the client at another host (a mirror, or a mock server in tests).
    pub fn with_base_url(base_url: &str) -> Result<Self, FeedError> {
        Ok(Self {
            client: BasicClient::with_timeout(USGS_TIMEOUT_SECS)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// e.g. `https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/2.5_day.geojson`
    pub fn feed_url(&self, window: RecencyWindow, floor: MagnitudeFloor) -> String {
        format!(
            "{}/earthquakes/feed/v1.0/summary/{}_{}.geojson",
            self.base_url,
            floor.feed_segment(),
            window.feed_period()
        )
    }

    /// Fetches and normalizes the summary feed for `window` and `floor`.
    ///
    /// # Errors
    ///
    /// Propagates transport, status, JSON and shape errors.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(
        &self,
        window: RecencyWindow,
        floor: MagnitudeFloor,
    ) -> Result<Vec<NormalizedRecord>, FeedError> {
        let url = self.feed_url(window, floor);
        let body = fetch_json(&self.client, &url).await?;

        let FeedPayload::FeatureCollection(features) = parse_payload(&body, ResponseShape::GeoJson)?
        else {
            return Err(FeedError::Shape(
                "expected GeoJSON FeatureCollection".to_string(),
            ));
        };

        info!(url = %url, count = features.len(), "USGS summary feed fetched");
        Ok(normalize_features(&features))
    }
}

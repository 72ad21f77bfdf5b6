//! Trait for sources of earthquake lists and per-event details.

use async_trait::async_trait;

use crate::error::FeedError;
use crate::model::{CatalogEntry, RawFeature};
use crate::normalize::{EarthquakeList, find_catalog_entry};

/// Abstraction over an earthquake backend.
#[async_trait]
pub trait EarthquakeApi: Send + Sync {
    /// Fetches and normalizes the full list.
    ///
    /// # Errors
    ///
    /// Transport, status, JSON and shape failures all propagate.
    async fn list_earthquakes(&self) -> Result<EarthquakeList, FeedError>;

    /// Best-effort fetch of a single GeoJSON Feature from `detail_url`.
    ///
    /// Any failure yields `None`.
    async fn fetch_detail(&self, detail_url: &str) -> Option<RawFeature>;

    /// Looks up a catalog entry by numeric id by listing and searching.
    ///
    /// Lists served as GeoJSON carry no numeric ids, so they never match.
    async fn get_by_id(&self, id: i64) -> Result<Option<CatalogEntry>, FeedError> {
        match self.list_earthquakes().await? {
            EarthquakeList::Catalog(entries) => Ok(find_catalog_entry(&entries, id).cloned()),
            EarthquakeList::Features(_) => Ok(None),
        }
    }
}

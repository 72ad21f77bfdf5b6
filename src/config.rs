//! Client configuration resolved once at startup.

use std::fmt;
use std::str::FromStr;

use crate::error::FeedError;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080";
pub const DEFAULT_API_KEY: &str = "your_dev_key";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which list-endpoint body shape the deployment serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseShape {
    /// Decide per response from the top-level JSON kind.
    #[default]
    Auto,
    /// A GeoJSON `FeatureCollection`.
    GeoJson,
    /// A bare array of catalog entries.
    Flat,
}

impl FromStr for ResponseShape {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ResponseShape::Auto),
            "geojson" => Ok(ResponseShape::GeoJson),
            "flat" => Ok(ResponseShape::Flat),
            other => Err(FeedError::Config(format!(
                "API_SHAPE must be one of auto, geojson, flat (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResponseShape::Auto => "auto",
            ResponseShape::GeoJson => "geojson",
            ResponseShape::Flat => "flat",
        };
        f.write_str(s)
    }
}

/// Settings for the earthquakes backend client.
///
/// Built once (normally via [`ClientConfig::from_env`]) and handed to
/// [`EarthquakesApiClient`](crate::infra::earthquakes::EarthquakesApiClient)
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub response_shape: ResponseShape,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            response_shape: ResponseShape::Auto,
        }
    }
}

impl ClientConfig {
    /// Reads `API_BASE`, `API_KEY`, `REQUEST_TIMEOUT_SECS` and `API_SHAPE`
    /// from the process environment.
    pub fn from_env() -> Result<Self, FeedError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults
    /// for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FeedError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = lookup("API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base = api_base.trim().trim_end_matches('/').to_string();
        if api_base.is_empty() {
            return Err(FeedError::Config("API_BASE must not be empty".to_string()));
        }

        let api_key = lookup("API_KEY").unwrap_or_else(|| DEFAULT_API_KEY.to_string());

        let timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                FeedError::Config(format!("REQUEST_TIMEOUT_SECS '{raw}' is not a number: {e}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let response_shape = match lookup("API_SHAPE") {
            Some(raw) => raw.parse()?,
            None => ResponseShape::Auto,
        };

        Ok(Self {
            api_base,
            api_key,
            timeout_secs,
            response_shape,
        })
    }

    /// Full URL of the list endpoint.
    pub fn list_url(&self) -> String {
        format!("{}/api/getEarthquakes", self.api_base)
    }
}

//! Raw GeoJSON records and the flat view model derived from them.
//!
//! Raw types are extracted field-by-field from `serde_json::Value`: a field
//! whose JSON type is not the expected primitive is left as `None` rather than
//! coerced or treated as an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `properties` bag of a GeoJSON earthquake feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mag: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    /// Event time, epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    /// Last update time, epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mag_type: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsunami: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sig: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
}

impl RawProperties {
    /// Extracts known properties from a JSON object. Non-objects yield an
    /// empty bag.
    pub fn from_value(value: &Value) -> Self {
        let get = |key: &str| value.get(key);
        Self {
            mag: number(get("mag")),
            place: string(get("place")),
            time: integer(get("time")),
            updated: integer(get("updated")),
            url: string(get("url")),
            detail: string(get("detail")),
            title: string(get("title")),
            mag_type: string(get("magType")),
            event_type: string(get("type")),
            status: string(get("status")),
            tsunami: integer(get("tsunami")),
            sig: integer(get("sig")),
            net: string(get("net")),
            code: string(get("code")),
            ids: string(get("ids")),
            types: string(get("types")),
        }
    }
}

/// A GeoJSON geometry object. Only `Point` geometries produce coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawGeometry {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Positional tuple `[lon, lat, depth?]`, elements left untyped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<Value>>,
}

impl RawGeometry {
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Some(Self {
            kind: string(value.get("type")),
            coordinates: value.get("coordinates").and_then(Value::as_array).cloned(),
        })
    }
}

/// A single GeoJSON `Feature` as served by the backend or a detail URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawFeature {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Upstream identifier in whatever JSON form it arrived; `Null` when absent.
    pub id: Value,
    pub properties: RawProperties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<RawGeometry>,
}

impl RawFeature {
    pub fn from_value(value: &Value) -> Self {
        Self {
            kind: string(value.get("type")),
            id: value.get("id").cloned().unwrap_or(Value::Null),
            properties: value
                .get("properties")
                .map(RawProperties::from_value)
                .unwrap_or_default(),
            geometry: value.get("geometry").and_then(RawGeometry::from_value),
        }
    }
}

/// Position of an event. Never swapped from GeoJSON `[lon, lat]` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_km: Option<f64>,
}

/// View model for one earthquake in a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub id: String,
    /// Never empty; synthesized from magnitude and place when upstream omits it.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usgs_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,
}

impl NormalizedRecord {
    /// Event time as a UTC timestamp, if present and representable.
    pub fn event_datetime(&self) -> Option<DateTime<Utc>> {
        self.time.and_then(DateTime::from_timestamp_millis)
    }

    pub fn updated_datetime(&self) -> Option<DateTime<Utc>> {
        self.updated.and_then(DateTime::from_timestamp_millis)
    }
}

/// One element of the flat-array list shape served by the catalog backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub geo_id: String,
    pub title: String,
    pub image: String,
    pub description: String,
}

fn number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

fn string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_owned)
}

/// Integral JSON numbers as-is; fractional ones truncated toward zero.
fn integer(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

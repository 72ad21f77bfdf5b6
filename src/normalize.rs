//! Maps raw list payloads into view records.
//!
//! Normalization never fails per record: a malformed field degrades to
//! `None` (or a default, for catalog entries) and the rest of the record is
//! kept.

use serde_json::Value;

use crate::model::{CatalogEntry, Coordinates, NormalizedRecord, RawFeature, RawGeometry};
use crate::parser::FeedPayload;

/// A normalized list, tagged by the shape it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum EarthquakeList {
    Features(Vec<NormalizedRecord>),
    Catalog(Vec<CatalogEntry>),
}

impl EarthquakeList {
    pub fn len(&self) -> usize {
        match self {
            EarthquakeList::Features(records) => records.len(),
            EarthquakeList::Catalog(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalizes a payload by its shape tag.
pub fn normalize_payload(payload: &FeedPayload) -> EarthquakeList {
    match payload {
        FeedPayload::FeatureCollection(features) => {
            EarthquakeList::Features(normalize_features(features))
        }
        FeedPayload::Catalog(items) => {
            EarthquakeList::Catalog(items.iter().map(normalize_catalog_entry).collect())
        }
    }
}

/// Normalizes every feature, preserving upstream order.
pub fn normalize_features(features: &[RawFeature]) -> Vec<NormalizedRecord> {
    features.iter().map(normalize_feature).collect()
}

pub fn normalize_feature(feature: &RawFeature) -> NormalizedRecord {
    let props = &feature.properties;

    let title = match props.title.as_deref() {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => synthesize_title(props.mag, props.place.as_deref()),
    };

    NormalizedRecord {
        id: coerce_id(&feature.id),
        title,
        magnitude: props.mag,
        place: props.place.clone(),
        time: props.time,
        updated: props.updated,
        coordinates: point_coordinates(feature.geometry.as_ref()),
        usgs_url: props.url.clone(),
        detail_url: props.detail.clone(),
    }
}

/// Builds `M <mag> - <place>`, using `?` and `Unknown location` for gaps.
pub fn synthesize_title(magnitude: Option<f64>, place: Option<&str>) -> String {
    let mag = magnitude.map_or_else(|| "?".to_string(), |m| m.to_string());
    let place = place.unwrap_or("Unknown location");
    format!("M {mag} - {place}")
}

fn coerce_id(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn point_coordinates(geometry: Option<&RawGeometry>) -> Option<Coordinates> {
    let geometry = geometry?;
    if geometry.kind.as_deref() != Some("Point") {
        return None;
    }

    let coords = geometry.coordinates.as_ref()?;
    let lon = coords.first()?.as_f64()?;
    let lat = coords.get(1)?.as_f64()?;
    let depth_km = coords.get(2).and_then(Value::as_f64);

    Some(Coordinates { lat, lon, depth_km })
}

/// Maps one flat-array element, defaulting fields of the wrong type.
pub fn normalize_catalog_entry(item: &Value) -> CatalogEntry {
    let text = |key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    CatalogEntry {
        id: item.get("id").and_then(Value::as_i64).unwrap_or(0),
        geo_id: text("geo_id"),
        title: text("title"),
        image: text("image"),
        description: text("description"),
    }
}

/// First catalog entry with the given numeric id.
pub fn find_catalog_entry(entries: &[CatalogEntry], id: i64) -> Option<&CatalogEntry> {
    entries.iter().find(|entry| entry.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(value: Value) -> RawFeature {
        RawFeature::from_value(&value)
    }

    #[test]
    fn test_non_numeric_mag_is_absent() {
        for mag in [json!("5.0"), json!(null), json!(true), json!([5.0]), json!({})] {
            let record = normalize_feature(&feature(json!({
                "id": "x",
                "properties": { "mag": mag }
            })));
            assert_eq!(record.magnitude, None);
        }
    }

    #[test]
    fn test_coordinates_not_swapped() {
        let record = normalize_feature(&feature(json!({
            "id": "x",
            "properties": {},
            "geometry": { "type": "Point", "coordinates": [-122.5, 37.7] }
        })));
        assert_eq!(
            record.coordinates,
            Some(Coordinates {
                lat: 37.7,
                lon: -122.5,
                depth_km: None
            })
        );
    }

    #[test]
    fn test_depth_from_third_element() {
        let record = normalize_feature(&feature(json!({
            "id": "x",
            "properties": {},
            "geometry": { "type": "Point", "coordinates": [10, 20, 8.25] }
        })));
        let coords = record.coordinates.unwrap();
        assert_eq!((coords.lat, coords.lon, coords.depth_km), (20.0, 10.0, Some(8.25)));
    }

    #[test]
    fn test_coordinates_require_point_and_two_numbers() {
        let cases = [
            json!({ "type": "Polygon", "coordinates": [1, 2] }),
            json!({ "type": "Point", "coordinates": [1] }),
            json!({ "type": "Point", "coordinates": ["1", 2] }),
            json!({ "type": "Point", "coordinates": "1,2" }),
            json!({ "coordinates": [1, 2] }),
        ];
        for geometry in cases {
            let record = normalize_feature(&feature(json!({
                "id": "x",
                "properties": {},
                "geometry": geometry.clone()
            })));
            assert_eq!(record.coordinates, None, "geometry {geometry}");
        }
    }

    #[test]
    fn test_non_numeric_depth_dropped() {
        let record = normalize_feature(&feature(json!({
            "id": "x",
            "properties": {},
            "geometry": { "type": "Point", "coordinates": [1, 2, "deep"] }
        })));
        assert_eq!(record.coordinates.unwrap().depth_km, None);
    }

    #[test]
    fn test_title_synthesis() {
        let record = normalize_feature(&feature(json!({
            "id": "x",
            "properties": { "mag": 4.5, "place": "10km NE of Town" }
        })));
        assert_eq!(record.title, "M 4.5 - 10km NE of Town");

        let record = normalize_feature(&feature(json!({ "id": "x", "properties": {} })));
        assert_eq!(record.title, "M ? - Unknown location");
    }

    #[test]
    fn test_upstream_title_preferred() {
        let record = normalize_feature(&feature(json!({
            "id": "x",
            "properties": { "mag": 4.5, "title": "M 4.5 - Official" }
        })));
        assert_eq!(record.title, "M 4.5 - Official");
    }

    #[test]
    fn test_empty_or_non_string_title_is_synthesized() {
        let record = normalize_feature(&feature(json!({
            "id": "x",
            "properties": { "mag": 3, "place": "Sea", "title": "" }
        })));
        assert_eq!(record.title, "M 3 - Sea");

        let record = normalize_feature(&feature(json!({
            "id": "x",
            "properties": { "title": 17 }
        })));
        assert_eq!(record.title, "M ? - Unknown location");
    }

    #[test]
    fn test_id_coerced_to_string() {
        assert_eq!(normalize_feature(&feature(json!({ "id": 123 }))).id, "123");
        assert_eq!(normalize_feature(&feature(json!({ "id": "ak0" }))).id, "ak0");
        assert_eq!(normalize_feature(&feature(json!({}))).id, "");
    }

    #[test]
    fn test_urls_and_times_copied_only_when_typed() {
        let record = normalize_feature(&feature(json!({
            "id": "x",
            "properties": {
                "url": "https://earthquake.usgs.gov/earthquakes/eventpage/x",
                "detail": 5,
                "time": 1_700_000_000_000_i64,
                "updated": "later"
            }
        })));
        assert_eq!(
            record.usgs_url.as_deref(),
            Some("https://earthquake.usgs.gov/earthquakes/eventpage/x")
        );
        assert_eq!(record.detail_url, None);
        assert_eq!(record.time, Some(1_700_000_000_000));
        assert_eq!(record.updated, None);
    }

    #[test]
    fn test_catalog_entry_defaults() {
        let entry = normalize_catalog_entry(&json!({
            "id": "7",
            "geo_id": "us1",
            "title": "Quake",
            "image": null,
            "description": 3
        }));
        assert_eq!(
            entry,
            CatalogEntry {
                id: 0,
                geo_id: "us1".to_string(),
                title: "Quake".to_string(),
                image: String::new(),
                description: String::new(),
            }
        );
    }

    #[test]
    fn test_normalize_payload_by_tag() {
        let payload = FeedPayload::Catalog(vec![json!({ "id": 2, "title": "b" })]);
        match normalize_payload(&payload) {
            EarthquakeList::Catalog(entries) => assert_eq!(entries[0].id, 2),
            other => panic!("unexpected list {other:?}"),
        }

        let payload = FeedPayload::FeatureCollection(vec![feature(json!({ "id": "a" }))]);
        match normalize_payload(&payload) {
            EarthquakeList::Features(records) => assert_eq!(records[0].id, "a"),
            other => panic!("unexpected list {other:?}"),
        }
    }

    #[test]
    fn test_find_catalog_entry() {
        let entries = vec![
            CatalogEntry {
                id: 1,
                ..CatalogEntry::default()
            },
            CatalogEntry {
                id: 2,
                title: "second".to_string(),
                ..CatalogEntry::default()
            },
        ];
        assert_eq!(find_catalog_entry(&entries, 2).unwrap().title, "second");
        assert!(find_catalog_entry(&entries, 3).is_none());
    }
}

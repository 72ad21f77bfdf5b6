//! Parsing boundary for list and detail response bodies.

use serde_json::Value;
use tracing::debug;

use crate::config::ResponseShape;
use crate::error::FeedError;
use crate::model::RawFeature;

/// A list-endpoint body, resolved to one of the two supported shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedPayload {
    /// GeoJSON `FeatureCollection`, features in upstream order.
    FeatureCollection(Vec<RawFeature>),
    /// Flat array of catalog records, elements still untyped.
    Catalog(Vec<Value>),
}

impl FeedPayload {
    pub fn len(&self) -> usize {
        match self {
            FeedPayload::FeatureCollection(features) => features.len(),
            FeedPayload::Catalog(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves a parsed list body into a [`FeedPayload`].
///
/// # Errors
///
/// Returns [`FeedError::Shape`] if the body does not match `shape` (or, for
/// [`ResponseShape::Auto`], neither supported shape).
pub fn parse_payload(body: &Value, shape: ResponseShape) -> Result<FeedPayload, FeedError> {
    match shape {
        ResponseShape::GeoJson => parse_feature_collection(body),
        ResponseShape::Flat => parse_catalog(body),
        ResponseShape::Auto => match body {
            Value::Array(_) => parse_catalog(body),
            Value::Object(_) => parse_feature_collection(body),
            _ => Err(FeedError::Shape(
                "expected GeoJSON FeatureCollection or array".to_string(),
            )),
        },
    }
}

fn parse_feature_collection(body: &Value) -> Result<FeedPayload, FeedError> {
    let is_collection = body.get("type").and_then(Value::as_str) == Some("FeatureCollection");
    let features = body.get("features").and_then(Value::as_array);

    match features {
        Some(features) if is_collection => Ok(FeedPayload::FeatureCollection(
            features.iter().map(RawFeature::from_value).collect(),
        )),
        _ => Err(FeedError::Shape(
            "expected GeoJSON FeatureCollection".to_string(),
        )),
    }
}

fn parse_catalog(body: &Value) -> Result<FeedPayload, FeedError> {
    body.as_array()
        .map(|items| FeedPayload::Catalog(items.clone()))
        .ok_or_else(|| FeedError::Shape("expected array".to_string()))
}

/// Validates a detail body as a single GeoJSON `Feature`.
///
/// Returns `None` unless the body has `type: "Feature"`, a `properties`
/// object and a `geometry` object.
pub fn parse_detail(body: &Value) -> Option<RawFeature> {
    let is_feature = body.get("type").and_then(Value::as_str) == Some("Feature");
    let has_properties = body.get("properties").is_some_and(Value::is_object);
    let has_geometry = body.get("geometry").is_some_and(Value::is_object);

    if is_feature && has_properties && has_geometry {
        Some(RawFeature::from_value(body))
    } else {
        debug!(
            is_feature,
            has_properties, has_geometry, "Detail body is not a GeoJSON Feature"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_feature_collection_preserves_order() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [
                { "id": "b", "properties": {} },
                { "id": "a", "properties": {} }
            ]
        });

        let payload = parse_payload(&body, ResponseShape::Auto).unwrap();
        match payload {
            FeedPayload::FeatureCollection(features) => {
                let ids: Vec<_> = features.iter().map(|f| f.id.clone()).collect();
                assert_eq!(ids, vec![json!("b"), json!("a")]);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_wrong_type_is_shape_error() {
        let result = parse_payload(&json!({ "type": "Wrong" }), ResponseShape::Auto);
        assert!(matches!(result, Err(FeedError::Shape(_))));
    }

    #[test]
    fn test_collection_without_features_array_is_shape_error() {
        let body = json!({ "type": "FeatureCollection", "features": {} });
        let result = parse_payload(&body, ResponseShape::GeoJson);
        assert!(matches!(result, Err(FeedError::Shape(_))));
    }

    #[test]
    fn test_empty_collection_is_not_an_error() {
        let body = json!({ "type": "FeatureCollection", "features": [] });
        let payload = parse_payload(&body, ResponseShape::GeoJson).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn test_auto_detects_flat_array() {
        let payload = parse_payload(&json!([{ "id": 1 }]), ResponseShape::Auto).unwrap();
        assert!(matches!(payload, FeedPayload::Catalog(ref items) if items.len() == 1));
    }

    #[test]
    fn test_fixed_shape_mismatch() {
        let collection = json!({ "type": "FeatureCollection", "features": [] });
        assert!(matches!(
            parse_payload(&collection, ResponseShape::Flat),
            Err(FeedError::Shape(_))
        ));
        assert!(matches!(
            parse_payload(&json!([]), ResponseShape::GeoJson),
            Err(FeedError::Shape(_))
        ));
    }

    #[test]
    fn test_auto_rejects_scalar() {
        assert!(matches!(
            parse_payload(&json!("hello"), ResponseShape::Auto),
            Err(FeedError::Shape(_))
        ));
    }

    #[test]
    fn test_parse_detail_requires_all_parts() {
        let full = json!({
            "type": "Feature",
            "id": "us7000abcd",
            "properties": { "mag": 6.1 },
            "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
        });
        let feature = parse_detail(&full).unwrap();
        assert_eq!(feature.properties.mag, Some(6.1));

        let mut missing_geometry = full.clone();
        missing_geometry["geometry"] = Value::Null;
        assert!(parse_detail(&missing_geometry).is_none());

        let mut wrong_type = full.clone();
        wrong_type["type"] = json!("FeatureCollection");
        assert!(parse_detail(&wrong_type).is_none());

        let mut no_properties = full;
        no_properties.as_object_mut().unwrap().remove("properties");
        assert!(parse_detail(&no_properties).is_none());
    }
}

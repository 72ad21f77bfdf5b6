//! Rendering of normalized records and catalog entries.
//!
//! Supports log-line summaries, JSON on stdout, and CSV append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::model::{CatalogEntry, NormalizedRecord};
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Flat CSV projection of a [`NormalizedRecord`].
#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    id: &'a str,
    title: &'a str,
    magnitude: Option<f64>,
    place: Option<&'a str>,
    time: Option<String>,
    updated: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    depth_km: Option<f64>,
    usgs_url: Option<&'a str>,
    detail_url: Option<&'a str>,
}

impl<'a> From<&'a NormalizedRecord> for RecordRow<'a> {
    fn from(r: &'a NormalizedRecord) -> Self {
        Self {
            id: &r.id,
            title: &r.title,
            magnitude: r.magnitude,
            place: r.place.as_deref(),
            time: r.event_datetime().map(|t| t.to_rfc3339()),
            updated: r.updated_datetime().map(|t| t.to_rfc3339()),
            lat: r.coordinates.map(|c| c.lat),
            lon: r.coordinates.map(|c| c.lon),
            depth_km: r.coordinates.and_then(|c| c.depth_km),
            usgs_url: r.usgs_url.as_deref(),
            detail_url: r.detail_url.as_deref(),
        }
    }
}

/// Logs one line per record: title, magnitude, place and event time.
pub fn print_records(records: &[NormalizedRecord]) {
    for r in records {
        let time = r
            .event_datetime()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        info!(
            id = %r.id,
            magnitude = r.magnitude,
            place = r.place.as_deref().unwrap_or("-"),
            time = %time,
            "{}",
            r.title
        );
    }
}

pub fn print_catalog(entries: &[CatalogEntry]) {
    for e in entries {
        info!(id = e.id, geo_id = %e.geo_id, "{}", e.title);
    }
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl std::fmt::Debug) {
    debug!("{:#?}", value);
}

/// Writes a value to stdout as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Appends records as rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_records(path: &str, records: &[NormalizedRecord]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = records.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    for r in records {
        writer.serialize(RecordRow::from(r))?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample() -> NormalizedRecord {
        NormalizedRecord {
            id: "us7000abcd".to_string(),
            title: "M 5.1 - 20 km S of Somewhere".to_string(),
            magnitude: Some(5.1),
            place: Some("20 km S of Somewhere".to_string()),
            time: Some(0),
            updated: None,
            coordinates: Some(Coordinates {
                lat: -12.5,
                lon: 166.25,
                depth_km: Some(35.0),
            }),
            usgs_url: None,
            detail_url: None,
        }
    }

    #[test]
    fn test_print_records_does_not_panic() {
        print_records(&[sample()]);
        print_pretty(&sample());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&vec![sample()]).unwrap();
    }

    #[test]
    fn test_append_records_writes_header_once() {
        let path = temp_path("quake_feed_test_header.csv");
        let _ = fs::remove_file(&path);

        append_records(&path, &[sample()]).unwrap();
        append_records(&path, &[sample(), sample()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines.iter().filter(|l| l.starts_with("id,")).count(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_row_flattens_coordinates() {
        let path = temp_path("quake_feed_test_row.csv");
        let _ = fs::remove_file(&path);

        append_records(&path, &[sample()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert!(row.contains("-12.5,166.25,35.0"), "row was {row}");
        assert!(row.contains("1970-01-01T00:00:00+00:00"), "row was {row}");

        fs::remove_file(&path).unwrap();
    }
}

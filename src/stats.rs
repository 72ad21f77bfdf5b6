use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::NormalizedRecord;

/// Field coverage across a list of normalized records.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct FeedSummary {
    pub timestamp: DateTime<Utc>,
    pub total_records: usize,

    // optional fields
    pub with_magnitude: usize,
    pub with_place: usize,
    pub with_time: usize,
    pub with_coordinates: usize,
    pub with_depth: usize,
    pub with_usgs_url: usize,
    pub with_detail_url: usize,

    pub max_magnitude: Option<f64>,
    pub newest_time: Option<i64>,
}

impl FeedSummary {
    pub fn from_records(records: &[NormalizedRecord]) -> Self {
        let mut s = FeedSummary {
            timestamp: Utc::now(),
            total_records: records.len(),
            ..FeedSummary::default()
        };

        for r in records {
            if let Some(mag) = r.magnitude {
                s.with_magnitude += 1;
                s.max_magnitude = Some(s.max_magnitude.map_or(mag, |m| m.max(mag)));
            }
            if r.place.is_some() {
                s.with_place += 1;
            }
            if let Some(time) = r.time {
                s.with_time += 1;
                s.newest_time = Some(s.newest_time.map_or(time, |t| t.max(time)));
            }
            if let Some(coords) = &r.coordinates {
                s.with_coordinates += 1;
                if coords.depth_km.is_some() {
                    s.with_depth += 1;
                }
            }
            if r.usgs_url.is_some() {
                s.with_usgs_url += 1;
            }
            if r.detail_url.is_some() {
                s.with_detail_url += 1;
            }
        }

        s
    }
}

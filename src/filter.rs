//! Client-side filtering of normalized records by recency and magnitude.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;

use crate::error::ParseSelectorError;
use crate::model::NormalizedRecord;

const HOUR_MS: i64 = 60 * 60 * 1000;

/// How far back from the evaluation instant an event may be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RecencyWindow {
    Hour,
    #[default]
    Day,
    Week,
    /// Fixed 30 days, not calendar-aware.
    Month,
}

impl RecencyWindow {
    pub const ALL: [RecencyWindow; 4] = [
        RecencyWindow::Hour,
        RecencyWindow::Day,
        RecencyWindow::Week,
        RecencyWindow::Month,
    ];

    pub fn duration_ms(self) -> i64 {
        match self {
            RecencyWindow::Hour => HOUR_MS,
            RecencyWindow::Day => 24 * HOUR_MS,
            RecencyWindow::Week => 7 * 24 * HOUR_MS,
            RecencyWindow::Month => 30 * 24 * HOUR_MS,
        }
    }

    /// Period name used in USGS summary feed file names.
    pub fn feed_period(self) -> &'static str {
        match self {
            RecencyWindow::Hour => "hour",
            RecencyWindow::Day => "day",
            RecencyWindow::Week => "week",
            RecencyWindow::Month => "month",
        }
    }

    fn code(self) -> &'static str {
        match self {
            RecencyWindow::Hour => "H",
            RecencyWindow::Day => "D",
            RecencyWindow::Week => "W",
            RecencyWindow::Month => "M",
        }
    }
}

impl FromStr for RecencyWindow {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "hour" => Ok(RecencyWindow::Hour),
            "d" | "day" => Ok(RecencyWindow::Day),
            "w" | "week" => Ok(RecencyWindow::Week),
            "m" | "month" => Ok(RecencyWindow::Month),
            _ => Err(ParseSelectorError {
                kind: "recency window",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RecencyWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Minimum magnitude an event must reach.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MagnitudeFloor {
    FourPointFive,
    TwoPointFive,
    OnePointZero,
    #[default]
    All,
}

impl MagnitudeFloor {
    pub const ALL: [MagnitudeFloor; 4] = [
        MagnitudeFloor::FourPointFive,
        MagnitudeFloor::TwoPointFive,
        MagnitudeFloor::OnePointZero,
        MagnitudeFloor::All,
    ];

    pub fn threshold(self) -> f64 {
        match self {
            MagnitudeFloor::FourPointFive => 4.5,
            MagnitudeFloor::TwoPointFive => 2.5,
            MagnitudeFloor::OnePointZero => 1.0,
            MagnitudeFloor::All => 0.0,
        }
    }

    /// Magnitude segment used in USGS summary feed file names.
    pub fn feed_segment(self) -> &'static str {
        match self {
            MagnitudeFloor::FourPointFive => "4.5",
            MagnitudeFloor::TwoPointFive => "2.5",
            MagnitudeFloor::OnePointZero => "1.0",
            MagnitudeFloor::All => "all",
        }
    }

    fn label(self) -> &'static str {
        match self {
            MagnitudeFloor::FourPointFive => "4.5+",
            MagnitudeFloor::TwoPointFive => "2.5+",
            MagnitudeFloor::OnePointZero => "1.0+",
            MagnitudeFloor::All => "all",
        }
    }
}

impl FromStr for MagnitudeFloor {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "4.5+" | "4.5" => Ok(MagnitudeFloor::FourPointFive),
            "2.5+" | "2.5" => Ok(MagnitudeFloor::TwoPointFive),
            "1.0+" | "1.0" | "1+" | "1" => Ok(MagnitudeFloor::OnePointZero),
            "all" => Ok(MagnitudeFloor::All),
            _ => Err(ParseSelectorError {
                kind: "magnitude floor",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for MagnitudeFloor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recency window and magnitude floor applied together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub window: RecencyWindow,
    pub floor: MagnitudeFloor,
}

impl FilterCriteria {
    pub fn new(window: RecencyWindow, floor: MagnitudeFloor) -> Self {
        Self { window, floor }
    }

    /// Whether `record` passes both predicates at `now_ms`.
    ///
    /// Missing time or magnitude passes the corresponding predicate. Events
    /// dated after `now_ms` pass the recency check.
    pub fn matches(&self, record: &NormalizedRecord, now_ms: i64) -> bool {
        let recent = record
            .time
            .is_none_or(|time| now_ms.saturating_sub(time) <= self.window.duration_ms());
        let strong = record
            .magnitude
            .is_none_or(|mag| mag >= self.floor.threshold());
        recent && strong
    }

    /// Retains matching records in their original order.
    pub fn apply_at(&self, records: &[NormalizedRecord], now_ms: i64) -> Vec<NormalizedRecord> {
        records
            .iter()
            .filter(|record| self.matches(record, now_ms))
            .cloned()
            .collect()
    }

    /// [`FilterCriteria::apply_at`] evaluated at the current wall-clock time.
    pub fn apply(&self, records: &[NormalizedRecord]) -> Vec<NormalizedRecord> {
        self.apply_at(records, Utc::now().timestamp_millis())
    }
}

pub fn filter_records(
    records: &[NormalizedRecord],
    window: RecencyWindow,
    floor: MagnitudeFloor,
    now_ms: i64,
) -> Vec<NormalizedRecord> {
    FilterCriteria::new(window, floor).apply_at(records, now_ms)
}

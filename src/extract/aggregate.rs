//! Aggregation of heterogeneous raw records into one reading.
//!
//! The open-data endpoints interleave records from several sensors of the
//! same station, each reporting only a subset of the measurements. This
//! module combines such a list into one complete reading by walking the
//! records from most recent to oldest and keeping, per field, the first
//! non-null value encountered.

use crate::extract::extractor::{
    extract_humidity_pct, extract_pressure_hpa, extract_rain_mm, extract_temperature_c,
    extract_timestamp, extract_wind_direction_deg, extract_wind_speed, RawRecord,
};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;

/// The canonical, fully-resolved measurement snapshot produced by combining
/// multiple raw records. Every field is optional: absence means no record in
/// the batch carried a usable value for it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregatedReading {
    /// Most recent extractable observation time.
    pub timestamp: Option<DateTime<Utc>>,
    /// Temperature in degrees Celsius.
    pub temperature_c: Option<f64>,
    /// Relative humidity in percent.
    pub humidity_pct: Option<f64>,
    /// Atmospheric pressure in hectopascals.
    pub pressure_hpa: Option<f64>,
    /// Rainfall in millimeters.
    pub rain_mm: Option<f64>,
    /// Wind speed.
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees.
    pub wind_direction_deg: Option<f64>,
}

impl AggregatedReading {
    /// Merges data from `other` into `self`, filling in `None` fields.
    pub fn merge_from(&mut self, other: &Self) {
        if self.timestamp.is_none() { self.timestamp = other.timestamp; }
        if self.temperature_c.is_none() { self.temperature_c = other.temperature_c; }
        if self.humidity_pct.is_none() { self.humidity_pct = other.humidity_pct; }
        if self.pressure_hpa.is_none() { self.pressure_hpa = other.pressure_hpa; }
        if self.rain_mm.is_none() { self.rain_mm = other.rain_mm; }
        if self.wind_speed.is_none() { self.wind_speed = other.wind_speed; }
        if self.wind_direction_deg.is_none() { self.wind_direction_deg = other.wind_direction_deg; }
    }

    /// True once every field holds a value.
    pub fn is_complete(&self) -> bool {
        self.timestamp.is_some()
            && self.temperature_c.is_some()
            && self.humidity_pct.is_some()
            && self.pressure_hpa.is_some()
            && self.rain_mm.is_some()
            && self.wind_speed.is_some()
            && self.wind_direction_deg.is_some()
    }

    fn fill_from_record(&mut self, record: &RawRecord) {
        if self.timestamp.is_none() {
            self.timestamp = extract_timestamp(record);
        }
        if self.temperature_c.is_none() {
            self.temperature_c = extract_temperature_c(record);
        }
        if self.humidity_pct.is_none() {
            self.humidity_pct = extract_humidity_pct(record);
        }
        if self.pressure_hpa.is_none() {
            self.pressure_hpa = extract_pressure_hpa(record);
        }
        if self.rain_mm.is_none() {
            self.rain_mm = extract_rain_mm(record);
        }
        if self.wind_speed.is_none() {
            self.wind_speed = extract_wind_speed(record);
        }
        if self.wind_direction_deg.is_none() {
            self.wind_direction_deg = extract_wind_direction_deg(record);
        }
    }
}

/// Combines a list of raw records into one [`AggregatedReading`].
///
/// Records are scanned from most recent to oldest; a record with no
/// extractable timestamp sorts after all dated ones. Each field keeps the
/// first non-null value encountered, and the scan stops early once every
/// field is filled. Records that fail extraction for a field simply
/// contribute nothing for it; the function never fails.
///
/// The sort is stable, so records with identical timestamps keep their input
/// order and the result is fully deterministic for a fixed input list.
pub fn aggregate_latest_values(records: &[RawRecord]) -> AggregatedReading {
    let mut sorted: Vec<(Option<DateTime<Utc>>, &RawRecord)> = records
        .iter()
        .map(|record| (extract_timestamp(record), record))
        .collect();
    sorted.sort_by_key(|(timestamp, _)| Reverse(*timestamp));

    let mut reading = AggregatedReading::default();
    for (_, record) in &sorted {
        reading.fill_from_record(record);
        if reading.is_complete() {
            break;
        }
    }
    reading
}

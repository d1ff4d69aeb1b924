//! Field extraction from raw weather records.
//!
//! Centralizes the reading of values out of the untyped record maps received
//! from the API, whose key names vary per station and dataset. Every function
//! here is pure and total: a value that is missing, of the wrong type, or
//! unparsable comes back as `None`, never as an error.

use crate::extract::field::SemanticField;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Map, Value};

/// One raw measurement entry as received from the data source, shaped
/// arbitrarily per station and sensor.
pub type RawRecord = Map<String, Value>;

/// Reserved key under which some datasets nest the actual payload.
const NESTED_PAYLOAD_KEY: &str = "data";

/// Pressure values strictly above this are taken to be pascals and converted
/// to hectopascals.
const PRESSURE_PA_THRESHOLD: f64 = 2000.0;

/// A coerced field value produced by [`extract`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    /// The record's observation time.
    Timestamp(DateTime<Utc>),
    /// Any of the six numeric measurements.
    Number(f64),
}

/// Returns the first non-null value found for a list of candidate keys.
///
/// When the record carries an object under the `"data"` key, that nested
/// payload is consulted before the top level for each candidate key. The
/// first key that resolves wins; later keys are not consulted.
pub fn first_value<'a>(record: &'a RawRecord, keys: &[&str]) -> Option<&'a Value> {
    let inner = record.get(NESTED_PAYLOAD_KEY).and_then(Value::as_object);

    for &key in keys {
        if let Some(inner) = inner {
            if let Some(value) = inner.get(key) {
                if !value.is_null() {
                    return Some(value);
                }
            }
        }
        if let Some(value) = record.get(key) {
            if !value.is_null() {
                return Some(value);
            }
        }
    }
    None
}

/// Coerces a JSON value to `f64`. Numbers pass through, numeric strings are
/// parsed; everything else is `None`.
pub fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Parses an ISO-8601 value into a UTC date-time.
///
/// A trailing `Z` is accepted as the `+00:00` offset. Offset-less date-times
/// and bare dates are interpreted as UTC.
pub fn parse_datetime(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

fn extract_float_field(record: &RawRecord, field: SemanticField) -> Option<f64> {
    first_value(record, field.alias_keys())
        .and_then(to_float)
        .or_else(|| first_value(record, field.fallback_keys()).and_then(to_float))
}

/// Extracts the observation timestamp.
pub fn extract_timestamp(record: &RawRecord) -> Option<DateTime<Utc>> {
    first_value(record, SemanticField::Timestamp.alias_keys()).and_then(parse_datetime)
}

/// Extracts the temperature in degrees Celsius.
pub fn extract_temperature_c(record: &RawRecord) -> Option<f64> {
    extract_float_field(record, SemanticField::TemperatureCelsius)
}

/// Extracts the relative humidity in percent.
pub fn extract_humidity_pct(record: &RawRecord) -> Option<f64> {
    extract_float_field(record, SemanticField::HumidityPercent)
}

/// Extracts the atmospheric pressure in hectopascals.
///
/// Values strictly above 2000 are read as pascals and divided by 100; values
/// at or below 2000 are assumed to already be hectopascals.
pub fn extract_pressure_hpa(record: &RawRecord) -> Option<f64> {
    let pressure = extract_float_field(record, SemanticField::PressureHectopascals)?;
    if pressure > PRESSURE_PA_THRESHOLD {
        return Some(pressure / 100.0);
    }
    Some(pressure)
}

/// Extracts the rainfall in millimeters.
pub fn extract_rain_mm(record: &RawRecord) -> Option<f64> {
    extract_float_field(record, SemanticField::RainMillimeters)
}

/// Extracts a wind speed, falling back to the max gust force when no mean
/// wind vector force is available.
pub fn extract_wind_speed(record: &RawRecord) -> Option<f64> {
    extract_float_field(record, SemanticField::WindSpeed)
}

/// Extracts the wind direction in degrees.
pub fn extract_wind_direction_deg(record: &RawRecord) -> Option<f64> {
    extract_float_field(record, SemanticField::WindDirectionDegrees)
}

/// Extracts one semantic field from a raw record.
///
/// Generic entry point over the typed per-field functions; useful when the
/// field of interest is only known at runtime.
pub fn extract(record: &RawRecord, field: SemanticField) -> Option<FieldValue> {
    match field {
        SemanticField::Timestamp => extract_timestamp(record).map(FieldValue::Timestamp),
        SemanticField::TemperatureCelsius => {
            extract_temperature_c(record).map(FieldValue::Number)
        }
        SemanticField::HumidityPercent => extract_humidity_pct(record).map(FieldValue::Number),
        SemanticField::PressureHectopascals => {
            extract_pressure_hpa(record).map(FieldValue::Number)
        }
        SemanticField::RainMillimeters => extract_rain_mm(record).map(FieldValue::Number),
        SemanticField::WindSpeed => extract_wind_speed(record).map(FieldValue::Number),
        SemanticField::WindDirectionDegrees => {
            extract_wind_direction_deg(record).map(FieldValue::Number)
        }
    }
}

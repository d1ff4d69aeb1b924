//! Typed representation of a station's latest weather reading.

use crate::extract::aggregate::AggregatedReading;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// The latest known weather reading of a station.
///
/// Built from an [`AggregatedReading`] once a timestamp could be resolved;
/// the individual measurements stay optional since not every station reports
/// every sensor for every period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReading {
    /// Name of the station the reading belongs to.
    pub station: String,
    /// Observation time of the most recent dated record.
    pub timestamp: DateTime<Utc>,
    /// Temperature in degrees Celsius.
    pub temperature_c: Option<f64>,
    /// Relative humidity in percent.
    pub humidity_pct: Option<f64>,
    /// Atmospheric pressure in hectopascals.
    pub pressure_hpa: Option<f64>,
    /// Rainfall in millimeters.
    pub rain_mm: Option<f64>,
    /// Wind speed in meters per second.
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees.
    pub wind_direction_deg: Option<f64>,
}

impl StationReading {
    /// Builds a typed reading from an aggregate.
    ///
    /// Returns `None` when the aggregate carries no timestamp: a reading that
    /// cannot be dated is not usable.
    pub fn from_aggregate(station: &str, aggregate: &AggregatedReading) -> Option<Self> {
        let timestamp = aggregate.timestamp?;
        Some(Self {
            station: station.to_string(),
            timestamp,
            temperature_c: aggregate.temperature_c,
            humidity_pct: aggregate.humidity_pct,
            pressure_hpa: aggregate.pressure_hpa,
            rain_mm: aggregate.rain_mm,
            wind_speed: aggregate.wind_speed,
            wind_direction_deg: aggregate.wind_direction_deg,
        })
    }
}

fn line(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {}", v, unit),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for StationReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "═".repeat(50);
        writeln!(f, "{}", rule)?;
        writeln!(f, "Station : {}", self.station)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Date/heure  : {}", self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "Température : {}", line(self.temperature_c, "°C"))?;
        writeln!(f, "Humidité    : {}", line(self.humidity_pct, "%"))?;
        writeln!(f, "Pression    : {}", line(self.pressure_hpa, "hPa"))?;
        writeln!(f, "Pluie       : {}", line(self.rain_mm, "mm"))?;
        writeln!(f, "Vent moyen  : {}", line(self.wind_speed, "m/s"))?;
        writeln!(f, "Direction   : {}", line(self.wind_direction_deg, "°"))?;
        write!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn full_aggregate() -> AggregatedReading {
        AggregatedReading {
            timestamp: Some(Utc.with_ymd_and_hms(2026, 1, 20, 10, 3, 0).unwrap()),
            temperature_c: Some(12.3),
            humidity_pct: Some(70.0),
            pressure_hpa: Some(1013.25),
            rain_mm: Some(0.0),
            wind_speed: Some(5.0),
            wind_direction_deg: Some(180.0),
        }
    }

    #[test]
    fn maps_every_field_from_the_aggregate() {
        let reading = StationReading::from_aggregate("Pech David", &full_aggregate()).unwrap();
        assert_eq!(reading.station, "Pech David");
        assert_eq!(
            reading.timestamp,
            Utc.with_ymd_and_hms(2026, 1, 20, 10, 3, 0).unwrap()
        );
        assert_eq!(reading.temperature_c, Some(12.3));
        assert_eq!(reading.pressure_hpa, Some(1013.25));
        assert_eq!(reading.wind_direction_deg, Some(180.0));
    }

    #[test]
    fn an_undated_aggregate_yields_no_reading() {
        let aggregate = AggregatedReading {
            timestamp: None,
            ..full_aggregate()
        };
        assert!(StationReading::from_aggregate("Pech David", &aggregate).is_none());
    }

    #[test]
    fn missing_measurements_render_as_not_available() {
        let aggregate = AggregatedReading {
            wind_speed: None,
            ..full_aggregate()
        };
        let reading = StationReading::from_aggregate("Pech David", &aggregate).unwrap();
        let rendered = reading.to_string();
        assert!(rendered.contains("Station : Pech David"));
        assert!(rendered.contains("Température : 12.3 °C"));
        assert!(rendered.contains("Vent moyen  : n/a"));
    }
}

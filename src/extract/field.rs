//! Defines the semantic measurement fields and the alias keys that carry them.
//!
//! Raw records from the open-data endpoint do not share a key schema: depending
//! on the station and dataset revision, the same measurement hides behind
//! different key names, sometimes in French long form, sometimes abbreviated.
//! Each [`SemanticField`] owns a fixed, priority-ordered list of the key names
//! known to carry it.

use std::fmt;

/// One of the seven canonical measurement kinds extracted from raw records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticField {
    /// Observation time of the record.
    Timestamp,
    /// Air temperature in degrees Celsius.
    TemperatureCelsius,
    /// Relative humidity in percent.
    HumidityPercent,
    /// Atmospheric pressure in hectopascals.
    PressureHectopascals,
    /// Rainfall in millimeters.
    RainMillimeters,
    /// Mean wind vector force.
    WindSpeed,
    /// Wind direction in degrees.
    WindDirectionDegrees,
}

impl SemanticField {
    /// All seven fields, in the order the aggregator fills them.
    pub const ALL: [SemanticField; 7] = [
        SemanticField::Timestamp,
        SemanticField::TemperatureCelsius,
        SemanticField::HumidityPercent,
        SemanticField::PressureHectopascals,
        SemanticField::RainMillimeters,
        SemanticField::WindSpeed,
        SemanticField::WindDirectionDegrees,
    ];

    /// Alias keys known to carry this field. Earlier keys take priority when
    /// a record holds several of them.
    pub(crate) fn alias_keys(&self) -> &'static [&'static str] {
        match self {
            SemanticField::Timestamp => &[
                "heure_de_paris",
                "heure_utc",
                "date",
                "datetime",
                "timestamp",
                "time",
            ],
            SemanticField::TemperatureCelsius => &[
                "temperature_en_degre_c",
                "temperature_air",
                "temp_air",
                "temperature",
                "temp",
                "temp_c",
                "temperature_c",
                "ta",
                "t",
            ],
            SemanticField::HumidityPercent => &[
                "humidite",
                "humidite_relative",
                "humidite_relative_en_pourcentage",
                "hygrometrie",
                "hr",
                "u",
            ],
            SemanticField::PressureHectopascals => &[
                "pression",
                "pression_atmo",
                "pression_atmospherique",
                "pressure",
                "pres",
                "ps",
                "p",
                "qnh",
            ],
            SemanticField::RainMillimeters => &["pluie", "precipitations", "rain", "rr"],
            SemanticField::WindSpeed => &[
                "force_moyenne_du_vecteur_vent",
                "vent_vitesse",
                "vitesse_vent",
                "wind_speed",
                "ff",
            ],
            SemanticField::WindDirectionDegrees => &[
                "direction_du_vecteur_vent_moyen",
                "direction_du_vecteur_de_vent_max_en_degres",
                "vent_direction",
                "direction_vent",
                "wind_dir",
                "dd",
            ],
        }
    }

    /// Secondary alias keys, consulted only when the primary list yields
    /// nothing. Only wind speed has one: the max gust force stands in when no
    /// mean wind vector force is reported.
    pub(crate) fn fallback_keys(&self) -> &'static [&'static str] {
        match self {
            SemanticField::WindSpeed => &["force_rafale_max"],
            _ => &[],
        }
    }

    /// Canonical output name of this field in an aggregated reading.
    pub fn name(&self) -> &'static str {
        match self {
            SemanticField::Timestamp => "timestamp",
            SemanticField::TemperatureCelsius => "temperature_c",
            SemanticField::HumidityPercent => "humidity_pct",
            SemanticField::PressureHectopascals => "pressure_hpa",
            SemanticField::RainMillimeters => "rain_mm",
            SemanticField::WindSpeed => "wind_speed",
            SemanticField::WindDirectionDegrees => "wind_direction_deg",
        }
    }
}

/// Formats a `SemanticField` using its canonical output name.
///
/// # Examples
///
/// ```
/// use meteopole::SemanticField;
///
/// assert_eq!(format!("{}", SemanticField::Timestamp), "timestamp");
/// assert_eq!(SemanticField::PressureHectopascals.to_string(), "pressure_hpa");
/// ```
impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_tables_put_dataset_keys_first() {
        assert_eq!(SemanticField::Timestamp.alias_keys()[0], "heure_de_paris");
        assert_eq!(
            SemanticField::TemperatureCelsius.alias_keys()[0],
            "temperature_en_degre_c"
        );
        assert_eq!(SemanticField::PressureHectopascals.alias_keys()[0], "pression");
        assert_eq!(
            SemanticField::WindSpeed.alias_keys()[0],
            "force_moyenne_du_vecteur_vent"
        );
    }

    #[test]
    fn only_wind_speed_has_a_fallback() {
        for field in SemanticField::ALL {
            match field {
                SemanticField::WindSpeed => {
                    assert_eq!(field.fallback_keys(), ["force_rafale_max"])
                }
                _ => assert!(field.fallback_keys().is_empty()),
            }
        }
    }

    #[test]
    fn display_matches_output_names() {
        assert_eq!(SemanticField::HumidityPercent.to_string(), "humidity_pct");
        assert_eq!(SemanticField::RainMillimeters.to_string(), "rain_mm");
        assert_eq!(
            SemanticField::WindDirectionDegrees.to_string(),
            "wind_direction_deg"
        );
    }
}

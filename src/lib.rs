mod error;
mod extract;
mod meteopole;
mod records;
mod stations;
mod types;
mod utils;

pub use error::MeteopoleError;
pub use meteopole::*;

pub use extract::aggregate::{aggregate_latest_values, AggregatedReading};
pub use extract::extractor::{
    extract, extract_humidity_pct, extract_pressure_hpa, extract_rain_mm, extract_temperature_c,
    extract_timestamp, extract_wind_direction_deg, extract_wind_speed, first_value,
    parse_datetime, to_float, FieldValue, RawRecord,
};
pub use extract::field::SemanticField;

pub use records::disk_cache::RecordCache;
pub use records::error::RecordError;
pub use records::fetcher::RecordFetcher;

pub use stations::registry::{StationEntry, StationRegistry};
pub use types::reading::StationReading;

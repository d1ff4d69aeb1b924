use crate::records::error::RecordError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeteopoleError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),

    #[error("Unknown station '{0}'")]
    UnknownStation(String),

    #[error("No dated reading available for station '{station}'")]
    NoReading { station: String },

    #[error("No station within {radius} km of ({lat}, {lon})")]
    NoStationWithinRadius { radius: f64, lat: f64, lon: f64 },
}

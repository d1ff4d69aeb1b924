//! This module provides the main entry point for querying the Toulouse
//! Métropole open-data weather stations. It fetches raw records per station,
//! caches them on disk and in memory, and reconciles them into one typed
//! reading per request.

use crate::error::MeteopoleError;
use crate::extract::aggregate::aggregate_latest_values;
use crate::extract::extractor::RawRecord;
use crate::records::disk_cache::RecordCache;
use crate::records::fetcher::RecordFetcher;
use crate::stations::registry::{StationEntry, StationRegistry};
use crate::types::reading::StationReading;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use bon::bon;
use log::warn;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second
/// (index 1). Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use meteopole::LatLon;
///
/// let toulouse_center = LatLon(43.6045, 1.4440);
/// assert_eq!(toulouse_center.0, 43.6045); // Latitude
/// assert_eq!(toulouse_center.1, 1.4440); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// How long a raw-record cache file on disk stays fresh.
const DISK_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// How long an aggregated reading stays in the in-memory cache.
const READING_CACHE_TTL: Duration = Duration::from_secs(60);

struct CachedReading {
    expires_at: Instant,
    reading: StationReading,
}

/// The main client for accessing Toulouse Métropole weather data.
///
/// Handles fetching raw station records, two-level caching (a per-station
/// JSON file on disk plus a short-lived in-memory reading cache), and the
/// aggregation of heterogeneous records into a [`StationReading`].
///
/// Create an instance using [`Meteopole::new()`] for default behavior (using
/// a standard cache directory) or [`Meteopole::with_cache_folder()`] for
/// custom cache locations.
///
/// # Examples
///
/// ```rust
/// # use meteopole::{Meteopole, MeteopoleError};
/// # async fn run() -> Result<(), MeteopoleError> {
/// let client = Meteopole::new().await?;
/// let reading = client
///     .latest_reading()
///     .station("Compans-Caffarelli")
///     .call()
///     .await?;
/// println!("{}", reading);
/// # Ok(())
/// # }
/// ```
pub struct Meteopole {
    fetcher: RecordFetcher,
    disk_cache: RecordCache,
    reading_cache: Mutex<HashMap<String, CachedReading>>,
}

#[bon]
impl Meteopole {
    /// Creates a new `Meteopole` client with a specified cache directory.
    ///
    /// Use this if you need to control where downloaded record files are
    /// stored. The directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`MeteopoleError::CacheDirCreation`] if the directory cannot
    /// be created or is not a directory.
    pub async fn with_cache_folder(cache_folder: PathBuf) -> Result<Self, MeteopoleError> {
        ensure_cache_dir_exists(&cache_folder)
            .await
            .map_err(|e| MeteopoleError::CacheDirCreation(cache_folder.clone(), e))?;
        Ok(Self {
            fetcher: RecordFetcher::new(),
            disk_cache: RecordCache::new(&cache_folder, DISK_CACHE_TTL),
            reading_cache: Mutex::new(HashMap::new()),
        })
    }

    /// Creates a new `Meteopole` client using the default cache directory.
    ///
    /// The default is resolved via the `dirs` crate, typically
    /// `~/.cache/meteopole_cache` on Linux.
    ///
    /// # Errors
    ///
    /// Returns [`MeteopoleError::CacheDirResolution`] if no system cache
    /// directory can be determined, or [`MeteopoleError::CacheDirCreation`]
    /// if it cannot be created.
    pub async fn new() -> Result<Self, MeteopoleError> {
        let cache_folder = get_cache_dir().map_err(MeteopoleError::CacheDirResolution)?;
        Self::with_cache_folder(cache_folder).await
    }

    /// Names of the known stations, in catalog order.
    pub fn station_names() -> Vec<&'static str> {
        StationRegistry::station_names()
    }

    /// Finds the catalog station closest to a geographical location.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** The coordinates to search around.
    /// * `.max_distance_km(f64)`: Optional. The maximum search radius in
    ///   kilometers. Defaults to `50.0`.
    ///
    /// # Errors
    ///
    /// Returns [`MeteopoleError::NoStationWithinRadius`] when no catalog
    /// station lies within the radius.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use meteopole::{Meteopole, LatLon, MeteopoleError};
    /// # async fn run() -> Result<(), MeteopoleError> {
    /// let client = Meteopole::new().await?;
    /// let station = client
    ///     .nearest_station()
    ///     .location(LatLon(43.6045, 1.4440))
    ///     .call()?;
    /// println!("Closest station: {}", station.name);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn nearest_station(
        &self,
        location: LatLon,
        max_distance_km: Option<f64>,
    ) -> Result<&'static StationEntry, MeteopoleError> {
        let max_distance_km = max_distance_km.unwrap_or(50.0);
        StationRegistry::nearest(location, max_distance_km)
            .map(|(station, _distance)| station)
            .ok_or(MeteopoleError::NoStationWithinRadius {
                radius: max_distance_km,
                lat: location.0,
                lon: location.1,
            })
    }

    /// Fetches the raw record list for a station, newest first as served by
    /// the API, without aggregating it.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.station(&str)`: **Required.** The catalog station name.
    /// * `.force_refresh(bool)`: Optional. Skip the disk cache and re-fetch
    ///   from the API. Defaults to `false`.
    ///
    /// # Errors
    ///
    /// Returns [`MeteopoleError::UnknownStation`] for a name not in the
    /// catalog, or a [`MeteopoleError::Record`] variant for transport and
    /// cache failures.
    #[builder]
    pub async fn raw_records(
        &self,
        station: &str,
        force_refresh: Option<bool>,
    ) -> Result<Vec<RawRecord>, MeteopoleError> {
        let force_refresh = force_refresh.unwrap_or(false);
        self.load_records(station, force_refresh).await
    }

    /// Returns the latest aggregated reading for a station.
    ///
    /// Resolution order: in-memory reading cache, then the on-disk record
    /// cache, then the live API (whose response refreshes the disk cache).
    /// The raw records are aggregated newest-first, each measurement keeping
    /// the first non-null value found.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.station(&str)`: **Required.** The catalog station name.
    /// * `.force_refresh(bool)`: Optional. Bypass both caches and re-fetch
    ///   from the API. Defaults to `false`.
    ///
    /// # Errors
    ///
    /// Returns [`MeteopoleError::UnknownStation`] for a name not in the
    /// catalog, [`MeteopoleError::NoReading`] when no record in the response
    /// carries an extractable timestamp, or a [`MeteopoleError::Record`]
    /// variant for transport failures.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use meteopole::{Meteopole, MeteopoleError};
    /// # async fn run() -> Result<(), MeteopoleError> {
    /// let client = Meteopole::new().await?;
    /// let reading = client
    ///     .latest_reading()
    ///     .station("Pech David")
    ///     .force_refresh(true)
    ///     .call()
    ///     .await?;
    /// if let Some(temp) = reading.temperature_c {
    ///     println!("{}: {} °C at {}", reading.station, temp, reading.timestamp);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn latest_reading(
        &self,
        station: &str,
        force_refresh: Option<bool>,
    ) -> Result<StationReading, MeteopoleError> {
        let force_refresh = force_refresh.unwrap_or(false);

        if !force_refresh {
            let mut cache = self.reading_cache.lock().await;
            if let Some(cached) = cache.get(station) {
                if cached.expires_at > Instant::now() {
                    return Ok(cached.reading.clone());
                }
                cache.remove(station);
            }
            // Not cached; release the lock before the slow path.
        }

        let records = self.load_records(station, force_refresh).await?;
        let reading = reading_from_records(station, &records).ok_or_else(|| {
            MeteopoleError::NoReading {
                station: station.to_string(),
            }
        })?;

        let mut cache = self.reading_cache.lock().await;
        cache.insert(
            station.to_string(),
            CachedReading {
                expires_at: Instant::now() + READING_CACHE_TTL,
                reading: reading.clone(),
            },
        );
        Ok(reading)
    }

    /// Disk cache first, then the API. An unreadable cache file degrades to a
    /// fetch; a failed cache write after a successful fetch is an error.
    async fn load_records(
        &self,
        station: &str,
        force_refresh: bool,
    ) -> Result<Vec<RawRecord>, MeteopoleError> {
        let endpoint = StationRegistry::endpoint_for(station)
            .ok_or_else(|| MeteopoleError::UnknownStation(station.to_string()))?;

        if !force_refresh {
            match self.disk_cache.load(station).await {
                Ok(Some(records)) => return Ok(records),
                Ok(None) => {}
                Err(e) => warn!("Ignoring unreadable record cache for {}: {}", station, e),
            }
        }

        let records = self.fetcher.fetch(&endpoint).await?;
        self.disk_cache.store(station, &records).await?;
        Ok(records)
    }
}

/// Aggregates a record batch into a typed reading; `None` when no record
/// yields a timestamp.
pub(crate) fn reading_from_records(
    station: &str,
    records: &[RawRecord],
) -> Option<StationReading> {
    let aggregate = aggregate_latest_values(records);
    StationReading::from_aggregate(station, &aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("test record must be a JSON object, got {other}"),
        }
    }

    #[test]
    fn reading_from_records_requires_a_timestamp() {
        let undated = vec![record(json!({"temperature_en_degre_c": 12.3}))];
        assert!(reading_from_records("Pech David", &undated).is_none());

        let dated = vec![record(json!({
            "heure_utc": "2026-01-20T10:00:00Z",
            "temperature_en_degre_c": 12.3,
        }))];
        let reading = reading_from_records("Pech David", &dated).unwrap();
        assert_eq!(reading.station, "Pech David");
        assert_eq!(reading.temperature_c, Some(12.3));
    }

    #[tokio::test]
    async fn unknown_station_is_rejected_before_any_io() {
        let dir = tempfile::tempdir().unwrap();
        let client = Meteopole::with_cache_folder(dir.path().to_path_buf())
            .await
            .unwrap();

        match client.latest_reading().station("Capitole").call().await {
            Err(MeteopoleError::UnknownStation(name)) => assert_eq!(name, "Capitole"),
            other => panic!("expected UnknownStation, got {other:?}"),
        }
    }

    #[test]
    fn station_names_match_the_registry() {
        assert_eq!(
            Meteopole::station_names(),
            StationRegistry::station_names()
        );
    }

    #[tokio::test]
    async fn nearest_station_defaults_to_50_km() {
        let dir = tempfile::tempdir().unwrap();
        let client = Meteopole::with_cache_folder(dir.path().to_path_buf())
            .await
            .unwrap();

        let station = client
            .nearest_station()
            .location(LatLon(43.6045, 1.4440))
            .call()
            .unwrap();
        assert_eq!(station.name, "Compans-Caffarelli");

        match client
            .nearest_station()
            .location(LatLon(48.8566, 2.3522))
            .call()
        {
            Err(MeteopoleError::NoStationWithinRadius { radius, .. }) => {
                assert_eq!(radius, 50.0)
            }
            other => panic!("expected NoStationWithinRadius, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn latest_reading_is_served_from_the_disk_cache() -> Result<(), MeteopoleError> {
        let dir = tempfile::tempdir().unwrap();
        let client = Meteopole::with_cache_folder(dir.path().to_path_buf()).await?;

        // Seed the disk cache directly; no network involved afterwards.
        let records = vec![record(json!({
            "heure_utc": "2026-01-20T10:00:00Z",
            "temperature_en_degre_c": 12.3,
            "humidite": 70,
        }))];
        client.disk_cache.store("Pech David", &records).await?;

        let reading = client
            .latest_reading()
            .station("Pech David")
            .call()
            .await?;
        assert_eq!(reading.temperature_c, Some(12.3));
        assert_eq!(reading.humidity_pct, Some(70.0));

        // Second call must come from the in-memory cache: wipe the disk
        // cache and expect the same answer.
        drop(dir);
        let again = client
            .latest_reading()
            .station("Pech David")
            .call()
            .await?;
        assert_eq!(again, reading);
        Ok(())
    }

    #[tokio::test]
    async fn cached_empty_record_list_yields_no_reading() -> Result<(), MeteopoleError> {
        let dir = tempfile::tempdir().unwrap();
        let client = Meteopole::with_cache_folder(dir.path().to_path_buf()).await?;
        client.disk_cache.store("Pech David", &[]).await?;

        match client.latest_reading().station("Pech David").call().await {
            Err(MeteopoleError::NoReading { station }) => assert_eq!(station, "Pech David"),
            other => panic!("expected NoReading, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    #[ignore = "hits the live Toulouse Métropole open-data API"]
    async fn fetches_a_live_reading() -> Result<(), MeteopoleError> {
        let dir = tempfile::tempdir().unwrap();
        let client = Meteopole::with_cache_folder(dir.path().to_path_buf()).await?;

        let reading = client
            .latest_reading()
            .station("Compans-Caffarelli")
            .call()
            .await?;
        println!("{}", reading);
        Ok(())
    }
}

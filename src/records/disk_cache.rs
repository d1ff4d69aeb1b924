//! On-disk cache of raw record lists, one JSON file per station.
//!
//! Freshness is decided from the cache file's modification time, so a file
//! older than the TTL is simply ignored and rewritten after the next fetch.

use crate::extract::extractor::RawRecord;
use crate::records::error::RecordError;
use log::info;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::NamedTempFile;
use tokio::{fs, task};

pub struct RecordCache {
    cache_dir: PathBuf,
    ttl: Duration,
}

impl RecordCache {
    pub fn new(cache_dir: &Path, ttl: Duration) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
            ttl,
        }
    }

    fn cache_path(&self, station: &str) -> PathBuf {
        self.cache_dir.join(format!("records-{}.json", slug(station)))
    }

    /// Loads the cached records for `station` if a fresh cache file exists.
    ///
    /// Returns `Ok(None)` when the file is missing or older than the TTL.
    pub async fn load(&self, station: &str) -> Result<Option<Vec<RawRecord>>, RecordError> {
        let path = self.cache_path(station);

        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RecordError::CacheMetadataRead(path, e)),
        };
        let modified = metadata
            .modified()
            .map_err(|e| RecordError::CacheMetadataRead(path.clone(), e))?;
        let age = SystemTime::now()
            .duration_since(modified)
            .map_err(|e| RecordError::SystemTimeCalculation(path.clone(), e))?;
        if age > self.ttl {
            info!(
                "Cache for station {} is stale ({}s old), ignoring {:?}",
                station,
                age.as_secs(),
                path
            );
            return Ok(None);
        }

        let bytes = fs::read(&path)
            .await
            .map_err(|e| RecordError::CacheRead(path.clone(), e))?;
        let records = serde_json::from_slice(&bytes)
            .map_err(|e| RecordError::CacheDecode(path.clone(), e))?;
        info!("Cache hit for station {} at {:?}", station, path);
        Ok(Some(records))
    }

    /// Writes `records` to the station's cache file.
    ///
    /// The file is written to a temporary sibling first and renamed into
    /// place, so a reader never observes a half-written cache file.
    pub async fn store(&self, station: &str, records: &[RawRecord]) -> Result<(), RecordError> {
        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| RecordError::CacheDirCreation(self.cache_dir.clone(), e))?;

        let path = self.cache_path(station);
        let bytes = serde_json::to_vec(records)?;

        let cache_dir = self.cache_dir.clone();
        let target = path.clone();
        task::spawn_blocking(move || {
            let mut temp = NamedTempFile::new_in(&cache_dir)
                .map_err(|e| RecordError::CacheWrite(target.clone(), e))?;
            temp.write_all(&bytes)
                .map_err(|e| RecordError::CacheWrite(target.clone(), e))?;
            temp.persist(&target)
                .map_err(|e| RecordError::CacheWrite(target.clone(), e.error))?;
            Ok::<(), RecordError>(())
        })
        .await??;

        info!("Cached {} records for station {} to {:?}", records.len(), station, path);
        Ok(())
    }
}

/// Filesystem-safe cache key for a station name.
fn slug(station: &str) -> String {
    station
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

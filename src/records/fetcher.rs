//! HTTP retrieval of raw weather records.
//!
//! Encapsulates the network call so the rest of the crate only ever sees an
//! already-deserialized list of record maps.

use crate::extract::extractor::RawRecord;
use crate::records::error::RecordError;
use log::{info, warn};
use reqwest::Client;
use serde_json::Value;

pub struct RecordFetcher {
    client: Client,
}

impl RecordFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetches the record list behind `url`.
    ///
    /// A payload without a recognizable record array yields an empty list
    /// rather than an error; transport and JSON failures are reported as
    /// [`RecordError`] variants.
    pub async fn fetch(&self, url: &str) -> Result<Vec<RawRecord>, RecordError> {
        info!("Fetching records from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RecordError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    RecordError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    RecordError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let payload: Value = response
            .json()
            .await
            .map_err(|e| RecordError::BodyRead(url.to_string(), e))?;

        let records = slice_records(&payload);
        if records.is_empty() {
            warn!("Response from {} contained no records", url);
        } else {
            info!("Received {} records from {}", records.len(), url);
        }
        Ok(records)
    }
}

impl Default for RecordFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Pulls the record array out of an API payload.
///
/// Explore v2.1 responses carry the rows under `results`; older dataset
/// exports use a top-level `data` array. Any other shape yields an empty
/// list, and array entries that are not objects are skipped.
pub(crate) fn slice_records(payload: &Value) -> Vec<RawRecord> {
    let rows = payload
        .get("results")
        .and_then(Value::as_array)
        .or_else(|| payload.get("data").and_then(Value::as_array));

    match rows {
        Some(rows) => rows.iter().filter_map(Value::as_object).cloned().collect(),
        None => Vec::new(),
    }
}

//! Batch file ingestion
//!
//! Turns comma-separated text into row objects keyed by the lowercased header.
//! Values stay as strings; numeric coercion is left to the prediction service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Template offered to operators as a formatting guide
pub const SAMPLE_TEMPLATE: &str = "id,brix,sucrose,purity,fiber,moisture\n\
TRK-001,18.5,15.2,82.1,12.5,75.0\n\
TRK-002,14.2,10.5,73.9,18.2,74.5\n\
TRK-003,19.2,17.4,90.6,11.2,76.5";

/// Download name for [`SAMPLE_TEMPLATE`]
pub const TEMPLATE_FILE_NAME: &str = "sugarcane_sample.csv";

/// Header tokens a batch file is expected to carry
pub const EXPECTED_HEADERS: [&str; 5] = ["brix", "sucrose", "purity", "fiber", "moisture"];

/// Batch file could not be ingested
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchFormatError {
    #[error("Invalid CSV format: expected a header and at least one data row, found {lines} non-blank line(s)")]
    InvalidFormat { lines: usize },
}

/// One batch row, keyed by lowercased header token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct BatchSample {
    fields: BTreeMap<String, String>,
}

impl BatchSample {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Row identifier, present on every parsed row
    pub fn id(&self) -> Option<&str> {
        self.get("id")
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BatchSample {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Synthetic identifier for the n-th (1-based) data row
pub fn synthetic_id(row: usize) -> String {
    format!("SAMP-{:03}", row)
}

/// Parse batch text into ordered row objects.
///
/// Blank lines are dropped before anything else. Short rows leave trailing
/// keys unset, surplus values are ignored, and rows without a usable `id` get
/// a `SAMP-NNN` identifier from their data-row position.
pub fn parse_batch(raw: &str) -> Result<Vec<BatchSample>, BatchFormatError> {
    let lines: Vec<&str> = raw.split('\n').filter(|line| !line.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Err(BatchFormatError::InvalidFormat { lines: lines.len() });
    }

    let headers: Vec<String> = lines[0]
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let samples: Vec<BatchSample> = lines[1..]
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let mut fields = BTreeMap::new();
            for (key, value) in headers.iter().zip(line.split(',')) {
                fields.insert(key.clone(), value.trim().to_string());
            }
            if fields.get("id").map_or(true, |id| id.is_empty()) {
                fields.insert("id".to_string(), synthetic_id(index + 1));
            }
            BatchSample { fields }
        })
        .collect();

    tracing::debug!(rows = samples.len(), columns = headers.len(), "parsed batch file");
    Ok(samples)
}

/// Expected header tokens absent from the parsed rows
pub fn missing_headers(samples: &[BatchSample]) -> Vec<&'static str> {
    EXPECTED_HEADERS
        .into_iter()
        .filter(|header| !samples.iter().any(|s| s.get(header).is_some()))
        .collect()
}

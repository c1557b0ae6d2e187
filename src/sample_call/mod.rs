//! Recorded backend calls
//!
//! A sample call file stores one request/response pair per YAML document:
//!
//! ```yaml
//! request:
//!   - set_preferences
//!   - '{"preferences": {"sound_on": false}}'
//! response: 'null'
//! ```
//!
//! The request argument and the response are JSON strings; they are decoded
//! when the file is loaded so every [`CallRecord`] carries structured values.

pub mod canonical;
mod playback;

pub use playback::Playback;

use crate::{Result, ZammError};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A sample call as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SampleCall {
    pub request: Vec<String>,
    pub response: String,
}

/// A decoded sample call
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    /// Name of the backend entry point
    pub entry_point: String,
    /// Argument payload sent with the request
    pub args: Value,
    /// Payload the backend answers with
    pub response: Value,
}

impl CallRecord {
    pub fn new(entry_point: impl Into<String>, args: Value, response: Value) -> Self {
        Self {
            entry_point: entry_point.into(),
            args,
            response,
        }
    }

    /// Canonical text of this record's request, used for matching
    pub fn request_key(&self) -> String {
        canonical::request_key(&self.entry_point, &self.args)
    }

    /// Decode a raw sample call, labelling errors with `source`
    pub fn from_sample(sample: SampleCall, source: &str) -> Result<Self> {
        let SampleCall { request, response } = sample;
        let [entry_point, raw_args]: [String; 2] = request.try_into().map_err(|r: Vec<String>| {
            ZammError::MalformedFixture(format!(
                "{}: request must have exactly 2 elements, found {}",
                source,
                r.len()
            ))
        })?;

        let args = serde_json::from_str(&raw_args).map_err(|e| {
            ZammError::MalformedFixture(format!("{}: request arguments are not JSON: {}", source, e))
        })?;
        let response = serde_json::from_str(&response).map_err(|e| {
            ZammError::MalformedFixture(format!("{}: response is not JSON: {}", source, e))
        })?;

        Ok(Self {
            entry_point,
            args,
            response,
        })
    }
}

/// Parse every sample call document in `text`
pub fn parse_sample_calls(text: &str, source: &str) -> Result<Vec<CallRecord>> {
    let mut records = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let sample = SampleCall::deserialize(document)
            .map_err(|e| ZammError::MalformedFixture(format!("{}: {}", source, e)))?;
        records.push(CallRecord::from_sample(sample, source)?);
    }

    if records.is_empty() {
        return Err(ZammError::MalformedFixture(format!(
            "{}: no sample calls found",
            source
        )));
    }
    Ok(records)
}

/// Load every sample call stored in the file at `path`
pub fn load_sample_calls<P: AsRef<Path>>(path: P) -> Result<Vec<CallRecord>> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let text = fs::read_to_string(path)
        .map_err(|e| ZammError::MalformedFixture(format!("{}: {}", source, e)))?;
    parse_sample_calls(&text, &source)
}

/// Load a file that holds exactly one sample call
pub fn load_sample_call<P: AsRef<Path>>(path: P) -> Result<CallRecord> {
    let path = path.as_ref();
    let mut records = load_sample_calls(path)?;
    if records.len() != 1 {
        return Err(ZammError::MalformedFixture(format!(
            "{}: expected one sample call, found {}",
            path.display(),
            records.len()
        )));
    }
    Ok(records.remove(0))
}

//! Sample call playback
//!
//! [`Playback`] stands in for the backend. Each invocation is matched by
//! content against the queue of unmatched sample calls; the first equal
//! request is removed and its response returned. A later identical call
//! needs a second queued record.

use super::{load_sample_calls, CallRecord};
use crate::rpc::{Invocation, Transport};
use crate::{Result, ZammError};
use parking_lot::Mutex;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Replays recorded backend calls
#[derive(Debug, Default)]
pub struct Playback {
    unmatched: Mutex<Vec<CallRecord>>,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue every sample call stored at `path`
    pub fn add_samples<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let records = load_sample_calls(path)?;
        info!(
            "Queued {} sample call(s) from {}",
            records.len(),
            path.display()
        );
        self.unmatched.lock().extend(records);
        Ok(())
    }

    /// Queue an already decoded sample call
    pub fn add_call(&self, record: CallRecord) {
        self.unmatched.lock().push(record);
    }

    /// Remove the first queued call whose request equals this one and
    /// return its response
    pub fn take_match(&self, entry_point: &str, args: &Value) -> Result<Value> {
        let key = super::canonical::request_key(entry_point, args);
        let mut unmatched = self.unmatched.lock();
        let index = unmatched
            .iter()
            .position(|call| call.request_key() == key)
            .ok_or(ZammError::UnmatchedInvocation(key))?;
        let call = unmatched.remove(index);
        debug!(
            "Matched {} ({} call(s) still queued)",
            call.entry_point,
            unmatched.len()
        );
        Ok(call.response)
    }

    /// Answer an invocation from the queue.
    ///
    /// Matching happens before this returns; only the response is deferred.
    ///
    /// # Panics
    ///
    /// Panics when no queued call matches, failing the running scenario.
    pub fn mock_call(&self, entry_point: &str, args: Value) -> Invocation {
        match self.take_match(entry_point, &args) {
            Ok(response) => Box::pin(async move { Ok(response) }),
            Err(e) => panic!("{}", e),
        }
    }

    /// Number of queued calls not yet matched
    pub fn pending(&self) -> usize {
        self.unmatched.lock().len()
    }

    /// Canonical requests of every queued call not yet matched
    pub fn unmatched_requests(&self) -> Vec<String> {
        self.unmatched.lock().iter().map(CallRecord::request_key).collect()
    }

    /// Fail if any queued call was never matched
    pub fn assert_exhausted(&self) -> Result<()> {
        let leftover = self.unmatched_requests();
        if leftover.is_empty() {
            Ok(())
        } else {
            Err(ZammError::UnconsumedFixture(leftover))
        }
    }

    /// Drop every queued call
    pub fn clear(&self) {
        self.unmatched.lock().clear();
    }
}

impl Transport for Playback {
    fn invoke(&self, entry_point: &str, args: Value) -> Invocation {
        self.mock_call(entry_point, args)
    }
}

//! The invocation seam between views and the backend
//!
//! Everything that talks to the backend goes through a [`Transport`]. The
//! real application injects a [`crate::backend::LocalBackend`]; tests and
//! stories inject a [`crate::sample_call::Playback`] instead.

use crate::Result;
use futures::future::LocalBoxFuture;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Pending result of a single invocation
pub type Invocation = LocalBoxFuture<'static, Result<Value>>;

/// A backend entry point dispatcher
pub trait Transport: Send + Sync {
    /// Invoke `entry_point` with a JSON argument payload
    fn invoke(&self, entry_point: &str, args: Value) -> Invocation;
}

/// A transport wrapper that records every invocation before forwarding it
pub struct RecordingTransport {
    inner: Arc<dyn Transport>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl RecordingTransport {
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of invocations seen so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// All invocations seen so far, oldest first
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl Transport for RecordingTransport {
    fn invoke(&self, entry_point: &str, args: Value) -> Invocation {
        debug!("Invoking {} with {}", entry_point, args);
        self.calls.lock().push((entry_point.to_string(), args.clone()));
        self.inner.invoke(entry_point, args)
    }
}

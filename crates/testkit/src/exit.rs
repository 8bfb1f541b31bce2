//! Exit-hook recorder for Fatal-path tests.

use crate::recording::RecordingAdapter;
use std::sync::{Arc, Mutex};

/// One observed call to the termination hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCall {
    /// Exit code passed to the hook.
    pub code: i32,
    /// Emissions already recorded by the observed adapter when the hook ran.
    pub emissions_before: usize,
}

/// Records termination-hook calls instead of exiting the process.
#[derive(Debug, Clone, Default)]
pub struct ExitRecorder {
    calls: Arc<Mutex<Vec<ExitCall>>>,
    observed: Option<RecordingAdapter>,
}

impl ExitRecorder {
    /// Recorder that does not observe any adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that snapshots `adapter`'s emission count at every exit call.
    pub fn observing(adapter: &RecordingAdapter) -> Self {
        Self {
            calls: Arc::default(),
            observed: Some(adapter.clone()),
        }
    }

    /// A hook suitable for a logger's exit-hook slot.
    pub fn hook(&self) -> impl Fn(i32) + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        let observed = self.observed.clone();
        move |code| {
            let emissions_before = observed
                .as_ref()
                .map_or(0, RecordingAdapter::emission_count);
            calls.lock().expect("exit recorder lock").push(ExitCall {
                code,
                emissions_before,
            });
        }
    }

    /// Every recorded call, in order.
    pub fn calls(&self) -> Vec<ExitCall> {
        self.calls.lock().expect("exit recorder lock").clone()
    }

    /// Exit codes passed so far.
    pub fn codes(&self) -> Vec<i32> {
        self.calls().into_iter().map(|call| call.code).collect()
    }
}

//! Fractional progress reporting during extraction.

use std::sync::Mutex;

/// Receives fractional extraction progress in [0, 1].
///
/// Purely informational: the presence or absence of an observer never
/// affects the extraction result.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, fraction: f64);
}

/// The no-op observer used when the caller does not want progress.
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _fraction: f64) {}
}

/// Wraps an observer so that downstream reports are clamped into [0, 1] and
/// monotonically non-decreasing, whatever the engine emits.
pub(crate) struct MonotonicProgress<'a> {
    inner: &'a dyn ProgressObserver,
    last: Mutex<f64>,
}

impl<'a> MonotonicProgress<'a> {
    pub(crate) fn new(inner: &'a dyn ProgressObserver) -> Self {
        Self {
            inner,
            last: Mutex::new(0.0),
        }
    }
}

impl ProgressObserver for MonotonicProgress<'_> {
    fn on_progress(&self, fraction: f64) {
        let fraction = if fraction.is_nan() {
            return;
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let mut last = self.last.lock().expect("progress lock poisoned");
        if fraction >= *last {
            *last = fraction;
            self.inner.on_progress(fraction);
        }
    }
}

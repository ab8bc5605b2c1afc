//! Progress blending for the two-phase submission signal
//!
//! One submission produces a single monotonic 0–100 signal out of two
//! unrelated phases: the upload (byte-accurate, usually fast) and the
//! server-side computation (unknown duration). Upload bytes are scaled into
//! the first 40 points of the signal; each Pending poll cycle then advances a
//! fixed estimate inside the remaining band, capped at 90 so the jump to 100
//! only ever happens on a confirmed terminal status.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Share of the overall signal allocated to the upload phase
pub(crate) const UPLOAD_BAND: u8 = 40;

/// Estimated advance per Pending poll cycle
pub(crate) const POLL_STEP: u8 = 5;

/// Ceiling for estimated progress while the task is still Pending
pub(crate) const POLL_CEILING: u8 = 90;

/// Callback invoked with each new overall progress value (0–100)
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

/// Monotonic progress accumulator for one submission
///
/// Values handed to the callback never decrease, and 100 is emitted exactly
/// when a completion is confirmed, never from an estimate.
pub struct ProgressTracker {
    emit: ProgressFn,
    current: AtomicU8,
}

impl ProgressTracker {
    /// Wrap a caller-supplied callback in a monotonic tracker
    pub fn new(emit: ProgressFn) -> Self {
        Self {
            emit,
            current: AtomicU8::new(0),
        }
    }

    /// Record upload progress; `upload_pct` is 0–100 over bytes sent
    pub fn upload(&self, upload_pct: u8) {
        // overall = round(upload_pct * 0.4)
        let scaled = (u32::from(upload_pct.min(100)) * u32::from(UPLOAD_BAND) + 50) / 100;
        self.set(scaled as u8);
    }

    /// Advance the estimate for one Pending poll cycle
    pub fn poll_tick(&self) {
        let current = self.current.load(Ordering::Relaxed).max(UPLOAD_BAND);
        self.set((current + POLL_STEP).min(POLL_CEILING));
    }

    /// Force the terminal 100 on a confirmed completion
    pub fn complete(&self) {
        self.set(100);
    }

    /// Last value handed to the callback
    pub fn current(&self) -> u8 {
        self.current.load(Ordering::Relaxed)
    }

    // Emits only when the value advances, which keeps the signal
    // non-decreasing even if upload chunks report out of order.
    fn set(&self, value: u8) {
        let prev = self.current.fetch_max(value, Ordering::Relaxed);
        if value > prev {
            (self.emit)(value);
        }
    }
}

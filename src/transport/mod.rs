//! Network operations against the processing service
//!
//! The [`Transport`] trait is the seam between the orchestrator and the wire:
//! it performs the physical HTTP operations and translates transport-level
//! failures into [`Error`](crate::Error) values, carrying no business logic.
//! [`HttpTransport`] is the reqwest-backed implementation; tests substitute
//! scripted implementations of the same trait.

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;

use crate::error::Result;
use crate::progress::ProgressFn;
use crate::types::{HealthStatus, PollStatus, SubmissionRequest, TaskHandle};

/// Physical network operations used by the orchestrator
#[async_trait]
pub trait Transport: Send + Sync {
    /// Multipart upload of a submission
    ///
    /// `on_upload_progress` receives 0–100 percentages over bytes sent,
    /// computed as `round(bytes_sent * 100 / bytes_total)`. Nothing is
    /// emitted when the total byte count is zero or unknown; that is a
    /// best-effort limitation, not a failure.
    async fn upload(
        &self,
        request: SubmissionRequest,
        on_upload_progress: ProgressFn,
    ) -> Result<TaskHandle>;

    /// Single status read for a queued task
    ///
    /// A network failure here is [`Error::Transport`](crate::Error::Transport),
    /// distinct from a successful call whose payload carries an error status.
    async fn poll_status(&self, task_id: &str) -> Result<PollStatus>;

    /// Retrieve the generated artifact as raw bytes
    async fn fetch_binary(&self, file_id: &str) -> Result<Vec<u8>>;

    /// Liveness probe
    async fn health(&self) -> Result<HealthStatus>;

    /// One-shot administrative close-day notification
    async fn close_day(&self, message: &str) -> Result<()>;
}

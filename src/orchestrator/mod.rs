//! Task orchestration: the submission state machine
//!
//! One submission is one sequential cooperative flow,
//! `Idle → Uploading → (Resolved-Immediate | Polling) → Done | Failed`:
//! validate, upload (bytes mapped into the first 40 points of the progress
//! signal), then either take the server's immediate result or poll the task
//! on a fixed cadence until a terminal status. The orchestrator holds no
//! state beyond one submission; concurrent submissions each get their own
//! invocation, task id, and progress signal.
//!
//! A transport failure mid-poll ends the whole submission; the loop never
//! retries a failed call. That is the documented policy of the service
//! contract, not an oversight.


use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::PollPolicy;
use crate::error::{Error, Result, messages};
use crate::progress::{ProgressFn, ProgressTracker};
use crate::transport::Transport;
use crate::types::{PollStatus, SubmissionRequest, TaskHandle, TaskOutcome};

/// Lifecycle phase of one submission; `Done` and `Failed` are terminal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SubmissionPhase {
    /// Nothing sent yet; validation happens here
    Idle,
    /// Multipart upload in flight
    Uploading,
    /// Fixed-cadence status polling of a queued task
    Polling,
    /// Terminal success
    Done,
    /// Terminal failure
    Failed,
}

impl SubmissionPhase {
    /// Legal transitions of the submission machine
    pub(crate) fn can_advance_to(self, next: SubmissionPhase) -> bool {
        use SubmissionPhase::{Done, Failed, Idle, Polling, Uploading};
        matches!(
            (self, next),
            (Idle, Uploading)
                | (Idle, Failed)
                | (Uploading, Polling)
                | (Uploading, Done)
                | (Uploading, Failed)
                | (Polling, Done)
                | (Polling, Failed)
        )
    }

    /// Whether no further transition is possible
    pub(crate) fn is_terminal(self) -> bool {
        matches!(self, SubmissionPhase::Done | SubmissionPhase::Failed)
    }
}

/// Tracks the current phase and logs every transition
struct PhaseTracker {
    phase: SubmissionPhase,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            phase: SubmissionPhase::Idle,
        }
    }

    fn advance(&mut self, next: SubmissionPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal submission transition {:?} -> {next:?}",
            self.phase
        );
        debug!(from = ?self.phase, to = ?next, "submission phase");
        self.phase = next;
    }
}

/// Drives one submission through upload, polling, and terminal resolution
///
/// Generic over [`Transport`] so the full state machine is testable against
/// scripted transports without a network.
pub struct TaskOrchestrator<T: Transport> {
    transport: Arc<T>,
    poll: PollPolicy,
}

impl<T: Transport> TaskOrchestrator<T> {
    /// Create an orchestrator over a transport with the given poll pacing
    pub fn new(transport: Arc<T>, poll: PollPolicy) -> Self {
        Self { transport, poll }
    }

    /// Drive one submission to its terminal outcome
    ///
    /// `on_progress` receives a monotonically non-decreasing sequence of
    /// 0–100 values, ending at exactly 100 if and only if the submission
    /// succeeds.
    pub async fn submit(
        &self,
        request: SubmissionRequest,
        on_progress: ProgressFn,
    ) -> Result<TaskOutcome> {
        let mut phase = PhaseTracker::new();

        if let Err(e) = request.validate() {
            phase.advance(SubmissionPhase::Failed);
            return Err(e);
        }

        let operation = request.operation;
        let progress = Arc::new(ProgressTracker::new(on_progress));

        phase.advance(SubmissionPhase::Uploading);
        let upload_progress: ProgressFn = {
            let tracker = progress.clone();
            Arc::new(move |pct| tracker.upload(pct))
        };
        let handle = match self.transport.upload(request, upload_progress).await {
            Ok(handle) => handle,
            Err(e) => {
                phase.advance(SubmissionPhase::Failed);
                return Err(e);
            }
        };

        match handle {
            TaskHandle::Immediate(outcome) => {
                progress.complete();
                phase.advance(SubmissionPhase::Done);
                info!(%operation, "submission resolved immediately");
                Ok(outcome)
            }
            TaskHandle::Queued { task_id } => {
                phase.advance(SubmissionPhase::Polling);
                debug!(%operation, %task_id, "task queued, entering poll loop");
                let result = self.poll_until_terminal(&task_id, &progress).await;
                phase.advance(match result {
                    Ok(_) => SubmissionPhase::Done,
                    Err(_) => SubmissionPhase::Failed,
                });
                result
            }
        }
    }

    /// Fixed-cadence poll loop; returns on the first terminal status
    async fn poll_until_terminal(
        &self,
        task_id: &str,
        progress: &ProgressTracker,
    ) -> Result<TaskOutcome> {
        let mut attempts: u32 = 0;
        loop {
            if let Some(max) = self.poll.max_attempts
                && attempts >= max
            {
                warn!(%task_id, attempts, "poll budget exhausted");
                return Err(Error::Timeout {
                    task_id: task_id.to_string(),
                    attempts,
                });
            }

            sleep(self.poll.interval).await;
            attempts += 1;

            // A failed poll ends the submission; no transparent retry.
            match self.transport.poll_status(task_id).await? {
                PollStatus::Pending => {
                    progress.poll_tick();
                    debug!(%task_id, attempts, progress = progress.current(), "task still pending");
                }
                PollStatus::Done {
                    file_id,
                    summary,
                    download_url,
                } => {
                    progress.complete();
                    info!(%task_id, attempts, "task done");
                    // Some responses omit a distinct artifact id; the task id
                    // aliases it on the server in that case.
                    return Ok(TaskOutcome {
                        file_id: Some(file_id.unwrap_or_else(|| task_id.to_string())),
                        summary,
                        download_url,
                    });
                }
                PollStatus::Error { message } => {
                    warn!(%task_id, attempts, "task failed");
                    return Err(Error::Service(
                        message.unwrap_or_else(|| messages::PROCESSING_FAILED.to_string()),
                    ));
                }
            }
        }
    }

    /// Retrieve a generated artifact by its file id
    ///
    /// On-demand and outside the submission state machine; failures always
    /// surface as the generic [`Error::Download`].
    pub async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        self.transport.fetch_binary(file_id).await
    }
}

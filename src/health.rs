//! Periodic liveness probing
//!
//! The probe is advisory: it pings `/api/health` once on startup and then on
//! a fixed interval (10 minutes by default, the cadence the service expects
//! from its callers). Failures are logged and otherwise ignored; a dead
//! health endpoint never affects an in-flight submission.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::transport::Transport;

/// Handle to a running background health probe
pub struct HealthProbe {
    cancel: CancellationToken,
    handle: tokio::task::JoinHandle<()>,
}

impl HealthProbe {
    /// Spawn a probe that pings immediately and then every `interval`
    pub fn spawn<T: Transport + 'static>(transport: Arc<T>, interval: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            loop {
                match transport.health().await {
                    Ok(status) => debug!(status = %status.status, "health probe ok"),
                    Err(e) => debug!(error = %e, "health probe failed"),
                }
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = sleep(interval) => {}
                }
            }
        });
        Self { cancel, handle }
    }

    /// Whether the probe loop has exited
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel the probe and wait for the loop to exit
    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}

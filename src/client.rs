//! Public client façade
//!
//! [`ProcessingClient`] binds the generic orchestrator to the HTTP transport
//! and the concrete service operations. Each `process_*` call drives one full
//! submission to its terminal outcome; `download` fetches a generated
//! artifact on demand.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::health::HealthProbe;
use crate::orchestrator::TaskOrchestrator;
use crate::transport::{HttpTransport, Transport};
use crate::types::{FilePayload, HealthStatus, Operation, SubmissionRequest, TaskOutcome};

/// Client for the NFS/FT spreadsheet processing service
pub struct ProcessingClient {
    orchestrator: TaskOrchestrator<HttpTransport>,
    transport: Arc<HttpTransport>,
    config: ClientConfig,
}

impl ProcessingClient {
    /// Create a client from a configuration
    pub fn new(config: ClientConfig) -> Self {
        let transport = Arc::new(HttpTransport::new(config.base_url.clone()));
        Self {
            orchestrator: TaskOrchestrator::new(transport.clone(), config.poll.clone()),
            transport,
            config,
        }
    }

    /// Submit the NFS invoices export for processing
    pub async fn process_nfs(
        &self,
        file: FilePayload,
        on_progress: impl Fn(u8) + Send + Sync + 'static,
    ) -> Result<TaskOutcome> {
        self.submit(SubmissionRequest::single(Operation::Nfs, file), on_progress)
            .await
    }

    /// Submit the Pisa invoices export for processing
    pub async fn process_pisa(
        &self,
        file: FilePayload,
        on_progress: impl Fn(u8) + Send + Sync + 'static,
    ) -> Result<TaskOutcome> {
        self.submit(SubmissionRequest::single(Operation::Pisa, file), on_progress)
            .await
    }

    /// Submit both exports for a two-file comparison
    ///
    /// The payloads may be ones the caller already submitted individually;
    /// reusing them is purely a caller-side convenience.
    pub async fn process_compare(
        &self,
        nfs_file: FilePayload,
        pisa_file: FilePayload,
        on_progress: impl Fn(u8) + Send + Sync + 'static,
    ) -> Result<TaskOutcome> {
        self.submit(SubmissionRequest::compare(nfs_file, pisa_file), on_progress)
            .await
    }

    /// Submit an arbitrary request; validation depends on its operation
    pub async fn submit(
        &self,
        request: SubmissionRequest,
        on_progress: impl Fn(u8) + Send + Sync + 'static,
    ) -> Result<TaskOutcome> {
        self.orchestrator.submit(request, Arc::new(on_progress)).await
    }

    /// Retrieve a generated artifact by the file id of a prior outcome
    pub async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        self.orchestrator.download(file_id).await
    }

    /// One-shot liveness check
    pub async fn health(&self) -> Result<HealthStatus> {
        self.transport.health().await
    }

    /// Send the administrative close-day notification
    pub async fn close_day(&self, message: &str) -> Result<()> {
        self.transport.close_day(message).await
    }

    /// Spawn the periodic background health probe
    ///
    /// Pings immediately and then every `health_interval` (10 minutes by
    /// default); failures are ignored.
    pub fn spawn_health_probe(&self) -> HealthProbe {
        HealthProbe::spawn(self.transport.clone(), self.config.health_interval)
    }
}

/// Timestamped filename for saving a downloaded artifact
///
/// Mirrors the service's own download naming,
/// e.g. `File_Riepilogativo_NFS_FT_20260829_153000.xlsx`.
pub fn suggested_filename(prefix: &str) -> String {
    format!(
        "{}_{}.xlsx",
        prefix,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )
}

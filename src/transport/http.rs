//! reqwest-backed transport implementation

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::Transport;
use crate::error::{Error, Result, messages};
use crate::progress::ProgressFn;
use crate::types::{
    FilePayload, HealthStatus, PollStatus, SubmissionRequest, TaskHandle, TaskStatusBody,
    UploadBody,
};

/// Upload stream chunk size; each consumed chunk triggers a progress report
const CHUNK_SIZE: usize = 64 * 1024;

/// Structured error body returned by the service on non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// HTTP transport against a configured base endpoint
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport for the given service base URL
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Transport(format!("invalid endpoint {path}: {e}")))
    }

    async fn try_fetch_binary(&self, file_id: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(&format!("/api/download/{file_id}"))?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(format!("download returned {status}")));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn upload(
        &self,
        request: SubmissionRequest,
        on_upload_progress: ProgressFn,
    ) -> Result<TaskHandle> {
        let operation = request.operation;
        let url = self.endpoint(operation.endpoint())?;
        let total = request.total_bytes();
        let sent = Arc::new(AtomicU64::new(0));

        let mut form = Form::new();
        for (field, file) in operation.file_fields().iter().zip(request.files) {
            let part = progress_part(file, total, sent.clone(), on_upload_progress.clone());
            form = form.part(*field, part);
        }

        debug!(%operation, %url, total_bytes = total, "uploading submission");
        let response = self.client.post(url).multipart(form).send().await.map_err(|e| {
            warn!(%operation, error = %e, "upload request failed");
            Error::Transport(operation.upload_fallback().to_string())
        })?;

        if !response.status().is_success() {
            let message = error_detail(response, operation.upload_fallback()).await;
            return Err(Error::Transport(message));
        }

        let body: UploadBody = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("malformed upload response: {e}")))?;
        Ok(TaskHandle::from(body))
    }

    async fn poll_status(&self, task_id: &str) -> Result<PollStatus> {
        let url = self.endpoint(&format!("/api/task/{task_id}"))?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("status poll failed: {e}")))?;

        if !response.status().is_success() {
            let message = error_detail(response, messages::PROCESSING_FAILED).await;
            return Err(Error::Transport(message));
        }

        let body: TaskStatusBody = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("malformed status body: {e}")))?;
        Ok(PollStatus::from(body))
    }

    async fn fetch_binary(&self, file_id: &str) -> Result<Vec<u8>> {
        // Every failure on this path collapses into the generic download
        // error; the underlying cause is only logged.
        self.try_fetch_binary(file_id).await.map_err(|e| {
            warn!(%file_id, error = %e, "download failed");
            Error::Download
        })
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint("/api/health")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("health check failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(format!("health check returned {status}")));
        }
        response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("malformed health body: {e}")))
    }

    async fn close_day(&self, message: &str) -> Result<()> {
        let url = self.endpoint("/api/close-day")?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .map_err(|e| Error::Transport(format!("close-day request failed: {e}")))?;

        if !response.status().is_success() {
            let detail = error_detail(response, messages::CLOSE_DAY_FAILED).await;
            return Err(Error::Transport(detail));
        }
        Ok(())
    }
}

/// Extract the server's structured `detail` field, falling back to `fallback`
async fn error_detail(response: reqwest::Response, fallback: &str) -> String {
    let status = response.status();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail);
    warn!(%status, detail = detail.as_deref().unwrap_or("<none>"), "service returned an error status");
    detail.unwrap_or_else(|| fallback.to_string())
}

/// Percentage of `sent` over `total`, rounded to the nearest integer
fn percent(sent: u64, total: u64) -> u8 {
    ((sent * 100 + total / 2) / total).min(100) as u8
}

/// Wrap a file payload in a chunked stream that reports cumulative bytes
/// across the whole submission as the body is consumed
fn progress_part(
    file: FilePayload,
    total: u64,
    sent: Arc<AtomicU64>,
    on_progress: ProgressFn,
) -> Part {
    let FilePayload { name, content } = file;
    let len = content.len() as u64;
    let chunks: Vec<Vec<u8>> = content.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();
    let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
        let consumed = sent.fetch_add(chunk.len() as u64, Ordering::Relaxed) + chunk.len() as u64;
        if total > 0 {
            on_progress(percent(consumed, total));
        }
        Ok::<_, std::io::Error>(chunk)
    }));
    Part::stream_with_length(reqwest::Body::wrap_stream(stream), len).file_name(name)
}

//! Core types for nfs-ft-client
//!
//! Domain types for one submission (operation, payloads, outcome) plus the
//! wire-level bodies exchanged with the processing service.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result, messages};

/// Which server-side processing variant a submission targets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Single-file processing of the NFS invoices export
    Nfs,
    /// Single-file processing of the Pisa invoices export
    Pisa,
    /// Two-file comparison between the NFS and Pisa exports
    Compare,
}

impl Operation {
    /// API path for the initial upload
    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::Nfs => "/api/process-file",
            Operation::Pisa => "/api/process-file-pisa",
            Operation::Compare => "/api/process-compare",
        }
    }

    /// Multipart field names, in submission order
    ///
    /// These must match the service contract exactly: single-file operations
    /// use `file`, compare uses `nfs_file` and `pisa_file`.
    pub fn file_fields(&self) -> &'static [&'static str] {
        match self {
            Operation::Nfs | Operation::Pisa => &["file"],
            Operation::Compare => &["nfs_file", "pisa_file"],
        }
    }

    /// Number of file payloads this operation requires
    pub fn expected_files(&self) -> usize {
        self.file_fields().len()
    }

    /// Default user-facing message when the upload fails without a server detail
    pub(crate) fn upload_fallback(&self) -> &'static str {
        match self {
            Operation::Compare => messages::COMPARE_FAILED,
            Operation::Nfs | Operation::Pisa => messages::UPLOAD_FAILED,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Nfs => "nfs",
            Operation::Pisa => "pisa",
            Operation::Compare => "compare",
        };
        f.write_str(name)
    }
}

/// A file to submit: name plus in-memory content
#[derive(Clone, Debug)]
pub struct FilePayload {
    /// Original file name, forwarded as the multipart part's filename
    pub name: String,
    /// Raw file content
    pub content: Vec<u8>,
}

impl FilePayload {
    /// Create a payload from a name and raw bytes
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Content size in bytes
    pub fn len(&self) -> u64 {
        self.content.len() as u64
    }

    /// Whether the payload carries no bytes
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// One or two file payloads tagged with the operation they target
///
/// Built by the caller at submission time and consumed by the upload;
/// nothing of it survives the request.
#[derive(Clone, Debug)]
pub struct SubmissionRequest {
    /// Target processing variant
    pub operation: Operation,
    /// Payloads, in the order of [`Operation::file_fields`]
    pub files: Vec<FilePayload>,
}

impl SubmissionRequest {
    /// Single-file request for [`Operation::Nfs`] or [`Operation::Pisa`]
    pub fn single(operation: Operation, file: FilePayload) -> Self {
        Self {
            operation,
            files: vec![file],
        }
    }

    /// Two-file compare request; `nfs_file` and `pisa_file` keep that order on the wire
    pub fn compare(nfs_file: FilePayload, pisa_file: FilePayload) -> Self {
        Self {
            operation: Operation::Compare,
            files: vec![nfs_file, pisa_file],
        }
    }

    /// Check the operation/file-count invariant
    ///
    /// Compare requires exactly two files, the single-file operations exactly
    /// one. Violations fail fast before any network call.
    pub fn validate(&self) -> Result<()> {
        let expected = self.operation.expected_files();
        if self.files.len() != expected {
            return Err(Error::Validation(format!(
                "{} requires exactly {} file(s), got {}",
                self.operation,
                expected,
                self.files.len()
            )));
        }
        Ok(())
    }

    /// Total payload size across all files, for upload progress
    pub(crate) fn total_bytes(&self) -> u64 {
        self.files.iter().map(FilePayload::len).sum()
    }
}

/// What the initial upload resolved to
#[derive(Clone, Debug)]
pub enum TaskHandle {
    /// The server answered synchronously with the final result
    Immediate(TaskOutcome),
    /// The server queued a background job; its status must be polled
    Queued {
        /// Opaque identifier correlating poll requests with the job
        task_id: String,
    },
}

/// Latest status snapshot for a queued task
#[derive(Clone, Debug, PartialEq)]
pub enum PollStatus {
    /// Still queued or processing
    Pending,
    /// Finished; the generated artifact is ready
    Done {
        /// Identifier of the generated artifact, when the service supplies one
        file_id: Option<String>,
        /// Processing summary payload, shape defined by the service
        summary: Option<serde_json::Value>,
        /// Download path hint supplied by some responses
        download_url: Option<String>,
    },
    /// The service reported a job-level failure
    Error {
        /// Server-supplied failure message, when present
        message: Option<String>,
    },
}

/// Terminal value of a successful submission
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    /// Identifier used to download the generated artifact
    ///
    /// On the polled path this is always set: when the Done payload omits a
    /// distinct file id, the task id itself is used (the service aliases the
    /// two). Immediate results carry whatever the response body supplied.
    pub file_id: Option<String>,

    /// Processing summary payload, shape defined by the service
    #[serde(default)]
    pub summary: Option<serde_json::Value>,

    /// Download path hint supplied by some responses
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Body of `GET /api/health`
#[derive(Clone, Debug, Deserialize)]
pub struct HealthStatus {
    /// Liveness indicator, `"ok"` when the service is up
    pub status: String,
    /// Service name, when reported
    #[serde(default)]
    pub service: Option<String>,
}

// ---------------------------------------------------------------------------
// Wire bodies
// ---------------------------------------------------------------------------

/// Body of `GET /api/task/{task_id}`
#[derive(Clone, Debug, Deserialize)]
pub struct TaskStatusBody {
    /// Raw status string: `queued`, `processing`, `done`, or `error`
    pub status: String,
    /// Summary payload, present once done
    #[serde(default)]
    pub summary: Option<serde_json::Value>,
    /// Failure message, present on error
    #[serde(default)]
    pub error: Option<String>,
    /// Artifact identifier, when distinct from the task id
    #[serde(default)]
    pub file_id: Option<String>,
    /// Download path hint
    #[serde(default)]
    pub download_url: Option<String>,
}

impl From<TaskStatusBody> for PollStatus {
    fn from(body: TaskStatusBody) -> Self {
        match body.status.as_str() {
            "done" => PollStatus::Done {
                file_id: body.file_id,
                summary: body.summary,
                download_url: body.download_url,
            },
            "error" => PollStatus::Error {
                message: body.error,
            },
            // "queued", "processing" and anything unrecognized are still in flight
            _ => PollStatus::Pending,
        }
    }
}

/// Body of a successful upload response
///
/// The service either queues a background job (`task_id` present) or, in
/// older deployments, answers synchronously with the final result.
#[derive(Clone, Debug, Deserialize)]
pub struct UploadBody {
    /// Task identifier of the queued job, absent for immediate results
    #[serde(default)]
    pub task_id: Option<String>,
    /// Artifact identifier, for immediate results
    #[serde(default)]
    pub file_id: Option<String>,
    /// Summary payload, for immediate results
    #[serde(default)]
    pub summary: Option<serde_json::Value>,
    /// Download path hint, for immediate results
    #[serde(default)]
    pub download_url: Option<String>,
}

impl From<UploadBody> for TaskHandle {
    fn from(body: UploadBody) -> Self {
        match body.task_id {
            Some(task_id) => TaskHandle::Queued { task_id },
            None => TaskHandle::Immediate(TaskOutcome {
                file_id: body.file_id,
                summary: body.summary,
                download_url: body.download_url,
            }),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_the_service_contract() {
        assert_eq!(Operation::Nfs.endpoint(), "/api/process-file");
        assert_eq!(Operation::Pisa.endpoint(), "/api/process-file-pisa");
        assert_eq!(Operation::Compare.endpoint(), "/api/process-compare");
    }

    #[test]
    fn field_names_match_the_service_contract() {
        assert_eq!(Operation::Nfs.file_fields(), &["file"]);
        assert_eq!(Operation::Pisa.file_fields(), &["file"]);
        assert_eq!(Operation::Compare.file_fields(), &["nfs_file", "pisa_file"]);
    }

    #[test]
    fn single_file_request_validates() {
        let request = SubmissionRequest::single(Operation::Nfs, FilePayload::new("a.xlsx", vec![1]));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn compare_request_with_two_files_validates() {
        let request = SubmissionRequest::compare(
            FilePayload::new("nfs.xlsx", vec![1]),
            FilePayload::new("pisa.xlsx", vec![2]),
        );
        assert!(request.validate().is_ok());
    }

    #[test]
    fn compare_request_with_one_file_fails_validation() {
        let request = SubmissionRequest {
            operation: Operation::Compare,
            files: vec![FilePayload::new("nfs.xlsx", vec![1])],
        };
        let err = request.validate().unwrap_err();
        assert!(matches!(err, crate::Error::Validation(_)));
        assert!(err.to_string().contains("compare"));
    }

    #[test]
    fn single_operation_with_two_files_fails_validation() {
        let request = SubmissionRequest {
            operation: Operation::Pisa,
            files: vec![
                FilePayload::new("a.xlsx", vec![1]),
                FilePayload::new("b.xlsx", vec![2]),
            ],
        };
        assert!(matches!(
            request.validate(),
            Err(crate::Error::Validation(_))
        ));
    }

    #[test]
    fn total_bytes_sums_all_payloads() {
        let request = SubmissionRequest::compare(
            FilePayload::new("nfs.xlsx", vec![0; 100]),
            FilePayload::new("pisa.xlsx", vec![0; 50]),
        );
        assert_eq!(request.total_bytes(), 150);
    }

    #[test]
    fn wire_status_done_maps_to_done_with_payload() {
        let body: TaskStatusBody = serde_json::from_value(serde_json::json!({
            "status": "done",
            "summary": {"rows": 12},
            "file_id": "f1",
            "download_url": "/api/download/f1",
        }))
        .unwrap();
        let status = PollStatus::from(body);
        assert_eq!(
            status,
            PollStatus::Done {
                file_id: Some("f1".into()),
                summary: Some(serde_json::json!({"rows": 12})),
                download_url: Some("/api/download/f1".into()),
            }
        );
    }

    #[test]
    fn wire_status_error_maps_to_error_with_message() {
        let body: TaskStatusBody =
            serde_json::from_value(serde_json::json!({"status": "error", "error": "boom"}))
                .unwrap();
        assert_eq!(
            PollStatus::from(body),
            PollStatus::Error {
                message: Some("boom".into())
            }
        );
    }

    #[test]
    fn queued_processing_and_unknown_statuses_are_pending() {
        for status in ["queued", "processing", "warming-up"] {
            let body: TaskStatusBody =
                serde_json::from_value(serde_json::json!({"status": status})).unwrap();
            assert_eq!(PollStatus::from(body), PollStatus::Pending, "{status}");
        }
    }

    #[test]
    fn upload_body_with_task_id_is_queued() {
        let body: UploadBody =
            serde_json::from_value(serde_json::json!({"success": true, "task_id": "t1"})).unwrap();
        assert!(matches!(
            TaskHandle::from(body),
            TaskHandle::Queued { task_id } if task_id == "t1"
        ));
    }

    #[test]
    fn upload_body_without_task_id_is_immediate() {
        let body: UploadBody = serde_json::from_value(serde_json::json!({
            "success": true,
            "file_id": "f9",
            "summary": {"rows": 3},
        }))
        .unwrap();
        match TaskHandle::from(body) {
            TaskHandle::Immediate(outcome) => {
                assert_eq!(outcome.file_id.as_deref(), Some("f9"));
                assert_eq!(outcome.summary, Some(serde_json::json!({"rows": 3})));
            }
            TaskHandle::Queued { .. } => panic!("expected an immediate result"),
        }
    }
}

//! Error types for nfs-ft-client
//!
//! The taxonomy distinguishes where a submission went wrong:
//! - [`Error::Validation`] — malformed submission, caught client-side before
//!   any network call
//! - [`Error::Transport`] — the HTTP exchange itself failed (upload, poll, or
//!   download did not complete with a success status)
//! - [`Error::Service`] — the HTTP exchange succeeded but the service reported
//!   a job-level failure
//! - [`Error::Download`] — binary retrieval failed; deliberately generic
//! - [`Error::Timeout`] — the configured poll budget ran out
//!
//! No error is retried automatically; each one is the terminal outcome of the
//! submission that produced it.

use thiserror::Error;

/// Result type alias for nfs-ft-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Default user-facing messages, matching the service's own wording (Italian).
///
/// These are the fallbacks used when the server does not supply a structured
/// `detail` field of its own.
pub mod messages {
    /// Fallback when a single-file upload fails without a server-supplied detail
    pub const UPLOAD_FAILED: &str = "Errore durante il caricamento del file";

    /// Fallback when a compare upload fails without a server-supplied detail
    pub const COMPARE_FAILED: &str = "Errore durante il confronto dei file";

    /// Fallback when the service reports a failed job without a message
    pub const PROCESSING_FAILED: &str = "Errore durante l'elaborazione del file";

    /// The single message used for every download failure
    pub const DOWNLOAD_FAILED: &str = "Errore durante il download del file";

    /// Fallback when the close-day request fails without a server-supplied detail
    pub const CLOSE_DAY_FAILED: &str = "Errore durante la chiusura della giornata";
}

/// Main error type for nfs-ft-client
///
/// Every variant carries (or is) a single human-readable message suitable for
/// presenting to the submission caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed submission detected client-side; no network call was made
    #[error("invalid submission: {0}")]
    Validation(String),

    /// Network/HTTP-layer failure on upload, poll, or download
    ///
    /// The message is the server's structured `detail` field when one was
    /// present, otherwise the operation's default message.
    #[error("{0}")]
    Transport(String),

    /// The service completed the HTTP exchange but reported a job-level failure
    #[error("{0}")]
    Service(String),

    /// Binary retrieval failed
    ///
    /// The message is intentionally generic: the underlying cause (network
    /// failure, unknown file id, expired artifact) is logged but never
    /// surfaced on this path.
    #[error("{}", messages::DOWNLOAD_FAILED)]
    Download,

    /// The poll budget was exhausted before a terminal status was observed
    #[error("task {task_id} did not reach a terminal status after {attempts} polls")]
    Timeout {
        /// Identifier of the task that never completed
        task_id: String,
        /// Number of poll cycles performed before giving up
        attempts: u32,
    },
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_displays_bare_message() {
        let err = Error::Transport("Formato file non valido".into());
        assert_eq!(err.to_string(), "Formato file non valido");
    }

    #[test]
    fn service_error_displays_bare_message() {
        let err = Error::Service("boom".into());
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn validation_error_is_prefixed() {
        let err = Error::Validation("compare requires exactly 2 file(s), got 1".into());
        assert!(err.to_string().starts_with("invalid submission:"));
    }

    #[test]
    fn download_error_always_uses_the_generic_message() {
        assert_eq!(Error::Download.to_string(), messages::DOWNLOAD_FAILED);
    }

    #[test]
    fn timeout_error_names_task_and_attempt_count() {
        let err = Error::Timeout {
            task_id: "t-42".into(),
            attempts: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("t-42"));
        assert!(msg.contains('7'));
    }
}

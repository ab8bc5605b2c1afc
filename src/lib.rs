//! # nfs-ft-client
//!
//! Async client library for the NFS/FT spreadsheet processing service.
//!
//! The service turns one or two uploaded Excel exports into a generated
//! summary file, usually through a long-running background job. This crate
//! handles the whole exchange: multipart upload with byte-level progress,
//! task-id acquisition, fixed-cadence status polling, and artifact download,
//! while presenting the caller with a single monotonic 0–100 progress signal
//! and a single success/failure outcome per submission.
//!
//! ## Quick Start
//!
//! ```no_run
//! use nfs_ft_client::{ClientConfig, FilePayload, ProcessingClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://localhost:8000".parse()?);
//!     let client = ProcessingClient::new(config);
//!
//!     // Advisory liveness probe, pings every 10 minutes
//!     let probe = client.spawn_health_probe();
//!
//!     let file = FilePayload::new("invoices.xlsx", std::fs::read("invoices.xlsx")?);
//!     let outcome = client
//!         .process_nfs(file, |progress| println!("{progress}%"))
//!         .await?;
//!
//!     if let Some(file_id) = &outcome.file_id {
//!         let bytes = client.download(file_id).await?;
//!         std::fs::write(nfs_ft_client::suggested_filename("FT_NFS_Ricevute"), bytes)?;
//!     }
//!
//!     probe.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Design notes
//!
//! - One submission is one sequential cooperative flow; concurrent
//!   submissions each get an independent orchestrator invocation, task id,
//!   and progress signal.
//! - No network call is retried automatically: a transport failure anywhere
//!   in the flow is the terminal outcome of that submission.
//! - The network seam is the [`Transport`] trait, so the full state machine
//!   is testable against scripted transports.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Public client façade
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Periodic liveness probing
pub mod health;
/// Submission state machine
pub mod orchestrator;
/// Progress blending
pub mod progress;
/// HTTP transport layer
pub mod transport;
/// Core types and wire bodies
pub mod types;

// Re-export commonly used types
pub use client::{ProcessingClient, suggested_filename};
pub use config::{ClientConfig, PollPolicy};
pub use error::{Error, Result};
pub use health::HealthProbe;
pub use orchestrator::TaskOrchestrator;
pub use progress::ProgressFn;
pub use transport::{HttpTransport, Transport};
pub use types::{
    FilePayload, HealthStatus, Operation, PollStatus, SubmissionRequest, TaskHandle, TaskOutcome,
};

//! # watchdesk-upload
//!
//! Attachment upload lifecycle for the watchdesk client: staging with
//! validation, previews, serial or parallel batch upload with per-file
//! progress, retry, best-effort remote delete, and draft persistence of
//! completed uploads within a session.
//!
//! The tray talks to the network only through the
//! [`AttachmentTransport`](watchdesk_core::AttachmentTransport) trait;
//! `watchdesk-client`'s `ApiClient` implements it, and [`mock::MockTransport`]
//! stands in for tests.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use bytes::Bytes;
//! use watchdesk_core::models::uploads::StagedFile;
//! use watchdesk_upload::{AttachmentTray, MemoryDraftStore, MockTransport};
//!
//! # #[tokio::main]
//! # async fn main() -> watchdesk_core::Result<()> {
//! let tray = AttachmentTray::new(
//!     Arc::new(MockTransport::new()),
//!     Arc::new(MemoryDraftStore::new()),
//! );
//!
//! let file = StagedFile::new("photo.png", Some("image/png"), Bytes::from_static(b"..."));
//! let report = tray.stage_files(vec![file]).await?;
//! assert_eq!(report.staged, 1);
//!
//! let summary = tray.upload_all().await;
//! assert_eq!(summary.succeeded, 1);
//! # Ok(())
//! # }
//! ```

pub mod draft;
pub mod item;
pub mod mock;
pub mod tray;
pub mod validate;

pub use draft::MemoryDraftStore;
pub use item::{AttachmentItem, AttachmentView, LocalPreview, PreviewSource, UploadStatus};
pub use mock::MockTransport;
pub use tray::{AttachmentTray, StagedChangedFn, UploadMode, UploadSummary};
pub use validate::{RejectReason, Rejection, StageReport};

//! Core traits for watchdesk abstractions.
//!
//! These traits sit at the seams between the upload lifecycle and the
//! network/storage layers, enabling pluggable implementations and
//! testability. The credential store seam lives in [`crate::session`].

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::models::uploads::{StagedFile, StoredUpload};

/// Callback receiving upload progress as a percentage in `[0, 100]`.
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

/// Transport capable of moving attachments to and from the server.
#[async_trait]
pub trait AttachmentTransport: Send + Sync {
    /// Upload one file, reporting progress, and return the normalized
    /// descriptor.
    async fn upload(&self, file: &StagedFile, progress: ProgressFn) -> Result<StoredUpload>;

    /// Delete a previously uploaded attachment by its server id.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Per-session key/value storage for upload drafts.
///
/// Implementations are scoped to one browsing session: contents do not
/// survive the end of the session.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: String) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

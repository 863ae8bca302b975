//! Per-attachment lifecycle state.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use watchdesk_core::models::uploads::{is_image_url, StagedFile, StoredUpload};
use watchdesk_core::Result;

/// Lifecycle status of one attachment. Transitions:
/// `Staged -> Uploading -> Success | Error`, and `Error -> Uploading` on
/// retry. Nothing ever leaves `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Staged,
    Uploading,
    Success,
    Error,
}

/// Revocable on-disk preview of a locally staged image.
///
/// The backing temp file is deleted when the preview is dropped (the
/// object-URL revoke analog).
#[derive(Debug)]
pub struct LocalPreview {
    file: NamedTempFile,
}

impl LocalPreview {
    /// Materialize the staged bytes to a temp file for preview rendering.
    pub fn create(bytes: &[u8]) -> Result<Self> {
        let mut file = NamedTempFile::new()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Where a preview of the attachment can be rendered from.
#[derive(Debug, Default)]
pub enum PreviewSource {
    #[default]
    None,
    /// Local temp file for a staged (not yet uploaded) image.
    Local(LocalPreview),
    /// Server URL of an uploaded image.
    Remote(String),
}

impl PreviewSource {
    pub fn is_none(&self) -> bool {
        matches!(self, PreviewSource::None)
    }
}

/// One file moving through the upload lifecycle.
#[derive(Debug)]
pub struct AttachmentItem {
    /// The locally selected file, absent for restored uploads.
    pub file: Option<StagedFile>,
    /// Server-confirmed descriptor, present from `Success` onward.
    pub stored: Option<StoredUpload>,
    pub status: UploadStatus,
    /// Percentage in `[0, 100]`; meaningful while `Uploading`, retained
    /// as the last known value after a failure.
    pub progress: u8,
    pub preview: PreviewSource,
    pub last_error: Option<String>,
}

impl AttachmentItem {
    /// A freshly staged local file.
    pub fn staged(file: StagedFile, preview: PreviewSource) -> Self {
        Self {
            file: Some(file),
            stored: None,
            status: UploadStatus::Staged,
            progress: 0,
            preview,
            last_error: None,
        }
    }

    /// An already-uploaded attachment restored without a local file.
    pub fn restored(stored: StoredUpload) -> Self {
        let preview = if is_image_url(&stored.url) {
            PreviewSource::Remote(stored.url.clone())
        } else {
            PreviewSource::None
        };
        Self {
            file: None,
            stored: Some(stored),
            status: UploadStatus::Success,
            progress: 100,
            preview,
            last_error: None,
        }
    }

    /// Display name, from the local file or the stored descriptor.
    pub fn name(&self) -> Option<String> {
        self.file
            .as_ref()
            .map(|f| f.name.clone())
            .or_else(|| self.stored.as_ref().and_then(|s| s.file_name.clone()))
    }
}

/// Cloneable snapshot of an item for callers rendering the tray.
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentView {
    pub name: Option<String>,
    pub status: UploadStatus,
    pub progress: u8,
    pub url: Option<String>,
    pub preview_url: Option<String>,
    pub error: Option<String>,
}

impl AttachmentView {
    pub(crate) fn of(item: &AttachmentItem) -> Self {
        let preview_url = match &item.preview {
            PreviewSource::None => None,
            PreviewSource::Local(preview) => Some(preview.path().display().to_string()),
            PreviewSource::Remote(url) => Some(url.clone()),
        };
        Self {
            name: item.name(),
            status: item.status,
            progress: item.progress,
            url: item.stored.as_ref().map(|s| s.url.clone()),
            preview_url,
            error: item.last_error.clone(),
        }
    }
}

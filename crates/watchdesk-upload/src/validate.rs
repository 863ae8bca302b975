//! Staging validation: image MIME type and size ceiling.

use serde::Serialize;
use std::fmt;

use watchdesk_core::defaults::MAX_ATTACHMENT_SIZE_BYTES;
use watchdesk_core::models::uploads::StagedFile;

/// Why a selected file was refused at staging time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum RejectReason {
    NotAnImage { content_type: String },
    TooLarge { size: usize },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotAnImage { content_type } => {
                write!(f, "not an image ({})", content_type)
            }
            RejectReason::TooLarge { size } => {
                write!(
                    f,
                    "exceeds {} MiB ceiling ({} bytes)",
                    MAX_ATTACHMENT_SIZE_BYTES / (1024 * 1024),
                    size
                )
            }
        }
    }
}

/// One refused file in a staging batch.
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub name: String,
    pub reason: RejectReason,
}

/// Outcome of one `stage_files` batch. Rejections are reported, never
/// silently dropped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageReport {
    pub staged: usize,
    pub rejections: Vec<Rejection>,
}

/// Check one file against the staging rules.
pub fn validate(file: &StagedFile) -> Result<(), RejectReason> {
    if !file.is_image() {
        return Err(RejectReason::NotAnImage {
            content_type: file.content_type.clone(),
        });
    }
    if file.size() > MAX_ATTACHMENT_SIZE_BYTES {
        return Err(RejectReason::TooLarge { size: file.size() });
    }
    Ok(())
}

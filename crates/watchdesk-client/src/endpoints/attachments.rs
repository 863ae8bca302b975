//! Attachment upload and delete transport.
//!
//! The upload body streams in fixed-size chunks so the progress callback
//! ticks as bytes are handed to the transport. The raw response is
//! normalized into the canonical [`StoredUpload`] here, at the boundary.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use tracing::trace;

use watchdesk_core::defaults::{ATTACHMENT_FIELD, UPLOAD_CHUNK_BYTES};
use watchdesk_core::models::uploads::{RawUploadResponse, StagedFile, StoredUpload};
use watchdesk_core::{AttachmentTransport, ProgressFn, Result};

use crate::pipeline::ApiClient;

impl ApiClient {
    /// `POST /incidents/upload/attachment` (multipart, field `attachment`).
    pub async fn upload_attachment(
        &self,
        file: &StagedFile,
        progress: ProgressFn,
    ) -> Result<StoredUpload> {
        let resp = self
            .send_multipart("/incidents/upload/attachment", || {
                Form::new().part(ATTACHMENT_FIELD, attachment_part(file, progress.clone()))
            })
            .await?;

        let raw: RawUploadResponse = resp.json().await?;
        Ok(StoredUpload::from_raw(raw))
    }

    /// `DELETE /api/attachments/{id}`.
    pub async fn delete_attachment(&self, id: &str) -> Result<()> {
        self.delete(&format!("/api/attachments/{}", id)).await
    }
}

#[async_trait]
impl AttachmentTransport for ApiClient {
    async fn upload(&self, file: &StagedFile, progress: ProgressFn) -> Result<StoredUpload> {
        self.upload_attachment(file, progress).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.delete_attachment(id).await
    }
}

fn attachment_part(file: &StagedFile, progress: ProgressFn) -> Part {
    let total = file.size() as u64;
    let name = file.name.clone();
    let bytes = file.bytes.clone();

    let make = {
        let progress = progress.clone();
        move || {
            let body = reqwest::Body::wrap_stream(progress_stream(bytes.clone(), progress.clone()));
            Part::stream_with_length(body, total).file_name(name.clone())
        }
    };

    match make().mime_str(&file.content_type) {
        Ok(part) => part,
        // Malformed claimed type: send without an explicit part MIME.
        Err(_) => make(),
    }
}

/// Chunk the payload and tick the progress callback as each chunk is
/// pulled by the transport, clamped to `[0, 100]`.
fn progress_stream(
    bytes: Bytes,
    progress: ProgressFn,
) -> impl futures::Stream<Item = std::result::Result<Bytes, std::io::Error>> {
    let total = bytes.len().max(1);
    let chunks: Vec<Bytes> = (0..bytes.len())
        .step_by(UPLOAD_CHUNK_BYTES)
        .map(|start| bytes.slice(start..bytes.len().min(start + UPLOAD_CHUNK_BYTES)))
        .collect();

    let mut sent = 0usize;
    futures::stream::iter(chunks).map(move |chunk| {
        sent += chunk.len();
        let pct = ((sent * 100) / total).min(100) as u8;
        trace!(progress_pct = pct, "upload chunk sent");
        progress(pct);
        Ok(chunk)
    })
}

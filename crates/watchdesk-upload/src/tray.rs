//! The attachment tray: staging, preview navigation, upload orchestration,
//! and draft persistence.
//!
//! The tray is designed to be driven from one task at a time (the original
//! runs on a single-threaded event loop). Batch uploads assume the item
//! list is not mutated concurrently; internal locking only protects the
//! progress callbacks, which fire from transport tasks.

use std::sync::{Arc, Mutex};

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use watchdesk_core::defaults::DRAFT_STORAGE_KEY;
use watchdesk_core::models::uploads::{is_image_url, StagedFile, StoredUpload};
use watchdesk_core::{
    AttachmentTransport, ClientEvent, DraftStore, Error, EventBus, ProgressFn, Result,
};

use crate::item::{AttachmentItem, AttachmentView, LocalPreview, PreviewSource, UploadStatus};
use crate::validate::{validate, Rejection, StageReport};

/// How a batch upload schedules its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadMode {
    /// Strict list order, each upload awaited before the next starts.
    #[default]
    Serial,
    /// All eligible items at once; completion order is unspecified.
    Parallel,
}

/// Aggregate outcome of one batch upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Callback invoked with the current Success subset after every list
/// mutation.
pub type StagedChangedFn = Arc<dyn Fn(&[StoredUpload]) + Send + Sync>;

#[derive(Default)]
struct TrayState {
    items: Vec<AttachmentItem>,
    current: usize,
}

/// Ordered list of attachments moving through the upload lifecycle, with
/// one "current" item selected for preview.
pub struct AttachmentTray {
    state: Arc<Mutex<TrayState>>,
    transport: Arc<dyn AttachmentTransport>,
    drafts: Arc<dyn DraftStore>,
    events: EventBus,
    mode: UploadMode,
    staged_changed: Option<StagedChangedFn>,
}

impl AttachmentTray {
    pub fn new(transport: Arc<dyn AttachmentTransport>, drafts: Arc<dyn DraftStore>) -> Self {
        Self {
            state: Arc::new(Mutex::new(TrayState::default())),
            transport,
            drafts,
            events: EventBus::default(),
            mode: UploadMode::default(),
            staged_changed: None,
        }
    }

    pub fn with_mode(mut self, mode: UploadMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Register the callback receiving the Success subset after every
    /// list mutation.
    pub fn on_staged_changed(mut self, callback: StagedChangedFn) -> Self {
        self.staged_changed = Some(callback);
        self
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // ─── Staging ───────────────────────────────────────────────────────

    /// Validate and stage a batch of selected files.
    ///
    /// Rejected files are reported in the returned [`StageReport`] and
    /// never enter the list; accepted files become `Staged` items with a
    /// local preview. Staging the same file again in a later batch is
    /// allowed.
    pub async fn stage_files(&self, files: Vec<StagedFile>) -> Result<StageReport> {
        let mut report = StageReport::default();
        {
            let mut state = self.lock();
            for file in files {
                match validate(&file) {
                    Ok(()) => {
                        let preview = match LocalPreview::create(&file.bytes) {
                            Ok(preview) => PreviewSource::Local(preview),
                            Err(e) => {
                                warn!(file = %file.name, error = %e, "preview creation failed");
                                PreviewSource::None
                            }
                        };
                        debug!(file = %file.name, size = file.size(), "staged");
                        state.items.push(AttachmentItem::staged(file, preview));
                        report.staged += 1;
                    }
                    Err(reason) => {
                        warn!(file = %file.name, reason = %reason, "rejected at staging");
                        report.rejections.push(Rejection {
                            name: file.name,
                            reason,
                        });
                    }
                }
            }
        }
        self.persist().await?;
        Ok(report)
    }

    // ─── Uploading ─────────────────────────────────────────────────────

    /// Upload the item at `index`.
    ///
    /// Trivially succeeds without a network call when the item carries a
    /// stored result but no local file; fails with `Error::Upload` when it
    /// carries neither.
    pub async fn upload_one(&self, index: usize) -> Result<()> {
        let file = {
            let mut state = self.lock();
            let Some(item) = state.items.get_mut(index) else {
                return Err(Error::InvalidInput(format!(
                    "no attachment at index {}",
                    index
                )));
            };
            if item.status == UploadStatus::Success {
                return Ok(());
            }
            match (&item.file, &item.stored) {
                (None, Some(_)) => {
                    debug!(index, "already uploaded, nothing to send");
                    return Ok(());
                }
                (None, None) => {
                    return Err(Error::Upload("no file to upload".to_string()));
                }
                (Some(file), _) => {
                    item.status = UploadStatus::Uploading;
                    item.last_error = None;
                    file.clone()
                }
            }
        };

        let progress: ProgressFn = {
            let state = self.state.clone();
            Arc::new(move |pct| {
                let mut state = state.lock().expect("tray state poisoned");
                if let Some(item) = state.items.get_mut(index) {
                    item.progress = pct.min(100);
                }
            })
        };

        let outcome = self.transport.upload(&file, progress).await;

        let result = {
            let mut state = self.lock();
            let Some(item) = state.items.get_mut(index) else {
                // Removed while the upload was in flight.
                return Ok(());
            };
            match outcome {
                Ok(stored) => {
                    item.status = UploadStatus::Success;
                    item.progress = 100;
                    if item.preview.is_none() && is_image_url(&stored.url) {
                        item.preview = PreviewSource::Remote(stored.url.clone());
                    }
                    info!(index, url = %stored.url, "upload succeeded");
                    item.stored = Some(stored);
                    Ok(())
                }
                Err(e) => {
                    // Progress keeps its last known value.
                    item.status = UploadStatus::Error;
                    item.last_error = Some(e.to_string());
                    Err(e)
                }
            }
        };

        if let Err(e) = self.persist().await {
            warn!(error = %e, "draft persistence failed after upload");
        }
        result
    }

    /// Upload every `Staged` or `Error` item per the configured mode and
    /// aggregate the outcome. The summary is also emitted on the event
    /// bus. Serial mode continues past failures.
    pub async fn upload_all(&self) -> UploadSummary {
        let eligible: Vec<usize> = {
            let state = self.lock();
            state
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| {
                    matches!(item.status, UploadStatus::Staged | UploadStatus::Error)
                })
                .map(|(index, _)| index)
                .collect()
        };

        let mut succeeded = 0;
        let mut failed = 0;
        match self.mode {
            UploadMode::Serial => {
                for index in eligible {
                    match self.upload_one(index).await {
                        Ok(()) => succeeded += 1,
                        Err(e) => {
                            warn!(index, error = %e, "upload failed");
                            failed += 1;
                        }
                    }
                }
            }
            UploadMode::Parallel => {
                let results = join_all(eligible.iter().map(|&index| self.upload_one(index))).await;
                for (index, result) in eligible.into_iter().zip(results) {
                    match result {
                        Ok(()) => succeeded += 1,
                        Err(e) => {
                            warn!(index, error = %e, "upload failed");
                            failed += 1;
                        }
                    }
                }
            }
        }

        let summary = UploadSummary { succeeded, failed };
        info!(succeeded, failed, "batch upload finished");
        self.events
            .emit(ClientEvent::UploadFinished { succeeded, failed });
        summary
    }

    /// Retry from the currently previewed item, which must be in `Error`.
    ///
    /// Deliberately sweeps every staged/error item, not only the current
    /// one.
    pub async fn retry_current(&self) -> Result<UploadSummary> {
        {
            let state = self.lock();
            let in_error = state
                .items
                .get(state.current)
                .is_some_and(|item| item.status == UploadStatus::Error);
            if !in_error {
                return Err(Error::InvalidInput(
                    "current attachment is not in an error state".to_string(),
                ));
            }
        }
        Ok(self.upload_all().await)
    }

    // ─── Preview navigation ────────────────────────────────────────────

    /// Advance the preview circularly. No-op on an empty list.
    pub fn next(&self) {
        let mut state = self.lock();
        if state.items.is_empty() {
            return;
        }
        state.current = (state.current + 1) % state.items.len();
    }

    /// Step the preview back circularly. No-op on an empty list.
    pub fn prev(&self) {
        let mut state = self.lock();
        if state.items.is_empty() {
            return;
        }
        state.current = (state.current + state.items.len() - 1) % state.items.len();
    }

    // ─── Removal ───────────────────────────────────────────────────────

    /// Remove the currently previewed item.
    ///
    /// Uploaded items with a server id get a best-effort remote delete
    /// (failure logged, never surfaced). The local preview is revoked and
    /// the current index clamped to the new length.
    pub async fn delete_current(&self) -> Result<()> {
        let remote_id = {
            let mut state = self.lock();
            if state.items.is_empty() {
                return Ok(());
            }
            let index = state.current;
            // Dropping the item revokes any local preview.
            let item = state.items.remove(index);
            if state.current >= state.items.len() {
                state.current = state.items.len().saturating_sub(1);
            }
            match (item.status, item.stored) {
                (UploadStatus::Success, Some(stored)) => stored.id,
                _ => None,
            }
        };

        if let Some(id) = remote_id {
            if let Err(e) = self.transport.delete(&id).await {
                warn!(attachment_id = %id, error = %e, "remote delete failed");
            }
        }

        self.persist().await
    }

    /// Drop every item (revoking previews) and clear the stored draft.
    pub async fn clear(&self) -> Result<()> {
        {
            let mut state = self.lock();
            state.items.clear();
            state.current = 0;
        }
        self.drafts.remove(DRAFT_STORAGE_KEY).await?;
        if let Some(callback) = &self.staged_changed {
            callback(&[]);
        }
        Ok(())
    }

    // ─── Persistence ───────────────────────────────────────────────────

    /// Rebuild the tray from (a) the draft-store snapshot of earlier
    /// successful uploads and (b) externally supplied attachment URLs
    /// (editing an existing record). Both become `Success` items without
    /// a local file. Returns the number of restored items.
    pub async fn restore(&self, existing_urls: &[String]) -> Result<usize> {
        let mut restored: Vec<StoredUpload> = Vec::new();

        if let Some(raw) = self.drafts.get(DRAFT_STORAGE_KEY).await? {
            match serde_json::from_str::<Vec<StoredUpload>>(&raw) {
                Ok(snapshot) => restored.extend(snapshot),
                Err(e) => warn!(error = %e, "discarding unreadable upload draft"),
            }
        }

        for url in existing_urls {
            if url.is_empty() || restored.iter().any(|s| &s.url == url) {
                continue;
            }
            restored.push(StoredUpload::from_url(url.clone()));
        }

        let count = restored.len();
        {
            let mut state = self.lock();
            for stored in restored {
                state.items.push(AttachmentItem::restored(stored));
            }
        }
        if count > 0 {
            info!(count, "restored uploaded attachments");
        }
        self.persist().await?;
        Ok(count)
    }

    /// Write the Success subset to the draft store and hand it to the
    /// staged-changed callback.
    async fn persist(&self) -> Result<()> {
        let snapshot: Vec<StoredUpload> = {
            let state = self.lock();
            state
                .items
                .iter()
                .filter(|item| item.status == UploadStatus::Success)
                .filter_map(|item| item.stored.clone())
                .collect()
        };
        let json = serde_json::to_string(&snapshot)?;
        self.drafts.put(DRAFT_STORAGE_KEY, json).await?;
        if let Some(callback) = &self.staged_changed {
            callback(&snapshot);
        }
        Ok(())
    }

    // ─── Inspection ────────────────────────────────────────────────────

    pub fn views(&self) -> Vec<AttachmentView> {
        self.lock().items.iter().map(AttachmentView::of).collect()
    }

    pub fn current(&self) -> Option<AttachmentView> {
        let state = self.lock();
        state.items.get(state.current).map(AttachmentView::of)
    }

    pub fn current_index(&self) -> usize {
        self.lock().current
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TrayState> {
        self.state.lock().expect("tray state poisoned")
    }

    #[cfg(test)]
    fn push_raw(&self, item: AttachmentItem) {
        self.lock().items.push(item);
    }
}

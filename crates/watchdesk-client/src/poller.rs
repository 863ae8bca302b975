//! Fixed-interval comment polling.
//!
//! The poll may race with a user-initiated send or delete; whichever write
//! lands last wins, there is no merge logic.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;

use watchdesk_core::defaults::{COMMENT_POLL_INTERVAL_MS, PAGE_NO, PAGE_SIZE};
use watchdesk_core::ClientEvent;

use crate::pipeline::ApiClient;

/// Handle to a background comment refresh task.
///
/// Emits [`ClientEvent::CommentsRefreshed`] on the client's event bus
/// after every successful poll. Fetch failures are logged and the poll
/// continues. Dropping the handle stops the task.
pub struct CommentPoller {
    handle: JoinHandle<()>,
}

impl CommentPoller {
    /// Start polling the comment page for `incident_id` at the default
    /// interval.
    pub fn spawn(client: Arc<ApiClient>, incident_id: i64) -> Self {
        Self::spawn_with_interval(
            client,
            incident_id,
            Duration::from_millis(COMMENT_POLL_INTERVAL_MS),
        )
    }

    /// Start polling with a custom interval. The first poll fires
    /// immediately.
    pub fn spawn_with_interval(
        client: Arc<ApiClient>,
        incident_id: i64,
        interval: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match client.fetch_comments(incident_id, PAGE_NO, PAGE_SIZE).await {
                    Ok(page) => {
                        client.events().emit(ClientEvent::CommentsRefreshed {
                            incident_id,
                            count: page.content.len(),
                        });
                    }
                    Err(e) => {
                        warn!(incident_id, error = %e, "comment poll failed");
                    }
                }
            }
        });
        Self { handle }
    }

    /// Stop polling.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for CommentPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

//! Playback request search endpoint.

use watchdesk_core::models::envelope::{ApiEnvelope, Page};
use watchdesk_core::models::playbacks::{Playback, PlaybackFilterRequest};
use watchdesk_core::Result;

use super::auth::normalize;
use crate::pipeline::ApiClient;

impl ApiClient {
    /// `POST /playbackrequest/filter/search`.
    pub async fn search_playbacks(
        &self,
        req: &PlaybackFilterRequest,
    ) -> Result<Page<Playback>> {
        let env: ApiEnvelope<Page<Playback>> = self
            .post_json("/playbackrequest/filter/search", req)
            .await
            .map_err(normalize("Failed to fetch playback requests"))?;
        Ok(env.data)
    }
}

//! Incident comment endpoints.

use watchdesk_core::models::comments::{Comment, CommentPage, NewComment};
use watchdesk_core::models::envelope::ApiEnvelope;
use watchdesk_core::Result;

use crate::pipeline::ApiClient;

impl ApiClient {
    /// `GET /incidents/{id}/comment` with paging query parameters.
    pub async fn fetch_comments(
        &self,
        incident_id: i64,
        page_no: u32,
        page_size: u32,
    ) -> Result<CommentPage> {
        self.get_json(
            &format!("/incidents/{}/comment", incident_id),
            &[
                ("pageNo", page_no.to_string()),
                ("pageSize", page_size.to_string()),
            ],
        )
        .await
    }

    /// `POST /incidents/{id}/comment`.
    pub async fn post_comment(&self, incident_id: i64, text: &str) -> Result<Comment> {
        let env: ApiEnvelope<Comment> = self
            .post_json(
                &format!("/incidents/{}/comment", incident_id),
                &NewComment {
                    comments: text.to_string(),
                },
            )
            .await?;
        Ok(env.data)
    }

    /// `DELETE /incidents/{id}/comment/{commentId}`.
    pub async fn delete_comment(&self, incident_id: i64, comment_id: i64) -> Result<()> {
        self.delete(&format!(
            "/incidents/{}/comment/{}",
            incident_id, comment_id
        ))
        .await
    }
}

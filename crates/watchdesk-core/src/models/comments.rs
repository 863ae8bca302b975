//! Incident comment wire types.

use serde::{Deserialize, Serialize};

use super::incidents::Attachment;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentUser {
    pub username: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub comments: String,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub user: Option<CommentUser>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Page shape of `GET /incidents/{id}/comment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    pub incident_id: i64,
    pub page_no: u32,
    pub page_size: u32,
    #[serde(default)]
    pub content: Vec<Comment>,
}

/// Body for `POST /incidents/{id}/comment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub comments: String,
}

//! Playback request wire types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playback {
    pub id: i64,
    pub pbr_id: i64,
    pub pbr_created_date: String,
    pub pbr_no: String,
    pub pbr_date: String,
    #[serde(default)]
    pub pbr_category: Option<String>,
    pub pbr_priority: i32,
    pub pbr_status: String,
    pub pbr_stage: String,
    #[serde(default)]
    pub pbr_approver_username: Option<String>,
    pub pbr_creator_username: String,
    pub pbr_location: String,
    pub pbr_requestor_username: String,
    pub pbr_cust_name: String,
    #[serde(default)]
    pub pbr_categories: Option<Vec<String>>,
}

/// Body for `POST /playbackrequest/filter/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackFilterRequest {
    pub filter: String,
    pub stages: Vec<String>,
    pub page_no: u32,
    pub page_size: u32,
}

impl PlaybackFilterRequest {
    /// The dashboard always queries with the catch-all filter.
    pub fn all(stages: Vec<String>, page_no: u32, page_size: u32) -> Self {
        Self {
            filter: "all".to_string(),
            stages,
            page_no,
            page_size,
        }
    }
}

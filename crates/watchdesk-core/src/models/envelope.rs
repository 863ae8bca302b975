//! Response envelope and pagination shapes shared by most endpoints.

use serde::{Deserialize, Serialize};

/// Standard `{status, message, data}` wrapper the backend puts around most
/// payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: i32,
    pub message: String,
    pub data: T,
}

/// One page of a paged result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub has_next: bool,
    pub has_previous: bool,
    pub content: Vec<T>,
}

impl<T> Page<T> {
    /// An empty first page, useful as a fetch fallback.
    pub fn empty() -> Self {
        Self {
            page_number: 1,
            page_size: 0,
            total_pages: 0,
            total_elements: 0,
            has_next: false,
            has_previous: false,
            content: Vec::new(),
        }
    }
}

//! Incident wire types: search filters, detail records, and mutations.

use serde::{Deserialize, Serialize};

use crate::defaults::{PAGE_NO, PAGE_SIZE};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_id: i64,
    pub customer_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub site_id: i64,
    pub site_name: String,
    #[serde(default)]
    pub customer: Option<Customer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub category: String,
    #[serde(default)]
    pub category_priority: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub id: i64,
    pub outcome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reporter {
    pub id: i64,
    pub full_name: String,
}

/// Server-side attachment record attached to an incident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    #[serde(rename = "attachmentURL")]
    pub attachment_url: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub incident_no: Option<String>,
    pub incident_date: String,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub talk_down: Option<bool>,
    #[serde(default)]
    pub police_dispatched: Option<bool>,
    #[serde(default)]
    pub police_reference: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub site: Option<Site>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub incident_attachments: Vec<Attachment>,
    #[serde(default)]
    pub incident_creator_full_name: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
}

/// Filter payload for `POST /incidents/search`. Defaults mirror what the
/// dashboard sends for an unfiltered first page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentFilter {
    pub customers: Vec<i64>,
    pub sites: Vec<i64>,
    pub categories: Vec<i64>,
    pub reporters: Vec<i64>,
    pub priorities: Vec<i32>,
    pub status: Vec<String>,
    pub dispatched: Vec<bool>,
    pub stages: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub search_key: String,
    pub page_no: u32,
    pub page_size: u32,
}

impl Default for IncidentFilter {
    fn default() -> Self {
        Self {
            customers: Vec::new(),
            sites: Vec::new(),
            categories: Vec::new(),
            reporters: Vec::new(),
            priorities: Vec::new(),
            status: Vec::new(),
            dispatched: Vec::new(),
            stages: Vec::new(),
            start_date: None,
            end_date: None,
            search_key: String::new(),
            page_no: PAGE_NO,
            page_size: PAGE_SIZE,
        }
    }
}

/// Reference types used when creating or updating an incident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteRef {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentRef {
    #[serde(rename = "attachmentURL")]
    pub attachment_url: String,
    pub status: String,
}

/// Body for `POST /incidents` and `PUT /incidents/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRequest {
    pub categories: Vec<CategoryRef>,
    pub incident_date: String,
    pub talk_down: bool,
    pub police_dispatched: bool,
    pub police_reference: String,
    pub outcome: String,
    pub priority: i32,
    pub summary: String,
    pub stage: String,
    pub status: String,
    pub site: SiteRef,
    pub incident_attachments: Vec<AttachmentRef>,
}

/// Body for `PUT /incidents/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults() {
        let filter = IncidentFilter::default();
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["pageNo"], 1);
        assert_eq!(json["searchKey"], "");
        assert!(json["startDate"].is_null());
        assert_eq!(json["customers"], serde_json::json!([]));
    }

    #[test]
    fn test_attachment_url_field_name() {
        let att = Attachment {
            id: 1,
            attachment_url: "https://cdn/x.png".to_string(),
            status: "ACTIVE".to_string(),
        };
        let json = serde_json::to_value(&att).unwrap();
        assert_eq!(json["attachmentURL"], "https://cdn/x.png");
    }

    #[test]
    fn test_incident_parses_sparse_record() {
        let json = r#"{"incidentDate":"2026-02-01T10:00:00Z","siteName":"Depot 4"}"#;
        let incident: Incident = serde_json::from_str(json).unwrap();
        assert_eq!(incident.site_name.as_deref(), Some("Depot 4"));
        assert!(incident.categories.is_empty());
        assert!(incident.id.is_none());
    }
}

//! Filter option request payloads (customers, sites, reporters).

use serde::{Deserialize, Serialize};

use crate::defaults::{FILTER_PAGE_SIZE, PAGE_NO};

fn active() -> Vec<String> {
    vec!["ACTIVE".to_string()]
}

/// Body for `POST /customer/filter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFilterRequest {
    pub status: Vec<String>,
    pub search_key: String,
    pub site_ids: Vec<i64>,
    pub page_no: u32,
    pub page_size: u32,
}

impl Default for CustomerFilterRequest {
    fn default() -> Self {
        Self {
            status: active(),
            search_key: String::new(),
            site_ids: Vec::new(),
            page_no: PAGE_NO,
            page_size: FILTER_PAGE_SIZE,
        }
    }
}

/// Body for `POST /site/filter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteFilterRequest {
    pub status: Vec<String>,
    pub search_key: String,
    pub customer_ids: Vec<i64>,
    pub page_no: u32,
    pub page_size: u32,
}

impl Default for SiteFilterRequest {
    fn default() -> Self {
        Self {
            status: active(),
            search_key: String::new(),
            customer_ids: Vec::new(),
            page_no: PAGE_NO,
            page_size: FILTER_PAGE_SIZE,
        }
    }
}

/// Body for `POST /incidents/reporters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReporterFilterRequest {
    pub status: Vec<String>,
    pub search_key: String,
    pub page_no: u32,
    pub page_size: u32,
}

impl Default for ReporterFilterRequest {
    fn default() -> Self {
        Self {
            status: active(),
            search_key: String::new(),
            page_no: PAGE_NO,
            page_size: FILTER_PAGE_SIZE,
        }
    }
}

/// Cross-filter selection: already-chosen customers narrow the site list
/// and vice versa.
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    pub customers: Vec<i64>,
    pub sites: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_filter_defaults() {
        let req = CustomerFilterRequest::default();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["status"][0], "ACTIVE");
        assert_eq!(json["pageNo"], 1);
        assert_eq!(json["pageSize"], 100);
        assert_eq!(json["siteIds"], serde_json::json!([]));
    }
}

//! User profile wire types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSiteMapping {
    pub customer_id: i64,
    pub customer_name: String,
    pub site_id: i64,
    pub site_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email_id: String,
    pub username: String,
    pub role: String,
    pub full_name: String,
    #[serde(default)]
    pub phone_no: Option<String>,
    pub status: String,
    #[serde(default)]
    pub customer_site_mappings: Vec<CustomerSiteMapping>,
}

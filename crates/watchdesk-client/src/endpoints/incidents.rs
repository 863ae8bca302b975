//! Incident CRUD, search, export, and workflow endpoints.

use watchdesk_core::models::envelope::{ApiEnvelope, Page};
use watchdesk_core::models::incidents::{
    Incident, IncidentFilter, IncidentRequest, StatusChangeRequest,
};
use watchdesk_core::Result;

use crate::pipeline::ApiClient;

impl ApiClient {
    /// `POST /incidents/search` — paged filter query.
    pub async fn search_incidents(&self, filter: &IncidentFilter) -> Result<Page<Incident>> {
        let env: ApiEnvelope<Page<Incident>> = self.post_json("/incidents/search", filter).await?;
        Ok(env.data)
    }

    /// `GET /incidents/{id}`.
    pub async fn incident(&self, id: i64) -> Result<Incident> {
        let env: ApiEnvelope<Incident> = self
            .get_json(&format!("/incidents/{}", id), &[])
            .await?;
        Ok(env.data)
    }

    /// `GET /incidents/{id}/export` — binary report download.
    pub async fn export_incident(&self, id: i64) -> Result<Vec<u8>> {
        self.get_bytes(&format!("/incidents/{}/export", id)).await
    }

    /// `POST /incidents`.
    pub async fn create_incident(&self, req: &IncidentRequest) -> Result<Incident> {
        let env: ApiEnvelope<Incident> = self.post_json("/incidents", req).await?;
        Ok(env.data)
    }

    /// `PUT /incidents/{id}`.
    pub async fn update_incident(&self, id: i64, req: &IncidentRequest) -> Result<Incident> {
        let env: ApiEnvelope<Incident> = self
            .put_json(&format!("/incidents/{}", id), req)
            .await?;
        Ok(env.data)
    }

    /// `PUT /incidents/{id}/delete` — soft delete.
    pub async fn delete_incident(&self, id: i64) -> Result<()> {
        self.put_empty(&format!("/incidents/{}/delete", id)).await
    }

    /// `PUT /incidents/{id}/approve`.
    pub async fn approve_incident(&self, id: i64) -> Result<()> {
        self.put_empty(&format!("/incidents/{}/approve", id)).await
    }

    /// `PUT /incidents/{id}/status` with `BLOCKED`.
    pub async fn block_incident(&self, id: i64) -> Result<()> {
        self.set_incident_status(id, "BLOCKED").await
    }

    /// `PUT /incidents/{id}/status` with `ACTIVE`.
    pub async fn unblock_incident(&self, id: i64) -> Result<()> {
        self.set_incident_status(id, "ACTIVE").await
    }

    async fn set_incident_status(&self, id: i64, status: &str) -> Result<()> {
        let _: serde_json::Value = self
            .put_json(
                &format!("/incidents/{}/status", id),
                &StatusChangeRequest {
                    status: status.to_string(),
                },
            )
            .await?;
        Ok(())
    }
}

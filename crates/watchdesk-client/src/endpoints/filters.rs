//! Filter option endpoints and the combined dropdown aggregation.

use watchdesk_core::models::envelope::{ApiEnvelope, Page};
use watchdesk_core::models::filters::{
    CustomerFilterRequest, FilterSelection, ReporterFilterRequest, SiteFilterRequest,
};
use watchdesk_core::models::incidents::{Category, Customer, Outcome, Reporter, Site};
use watchdesk_core::Result;

use crate::pipeline::ApiClient;

/// Option lists backing the incident filter dropdowns.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    pub customers: Vec<Customer>,
    pub sites: Vec<Site>,
    pub categories: Vec<Category>,
    pub reporters: Vec<Reporter>,
}

impl ApiClient {
    /// `POST /customer/filter`.
    pub async fn filter_customers(&self, req: &CustomerFilterRequest) -> Result<Page<Customer>> {
        self.post_json("/customer/filter", req).await
    }

    /// `POST /site/filter`.
    pub async fn filter_sites(&self, req: &SiteFilterRequest) -> Result<Page<Site>> {
        self.post_json("/site/filter", req).await
    }

    /// `GET /category`.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        let env: ApiEnvelope<Vec<Category>> = self.get_json("/category", &[]).await?;
        Ok(env.data)
    }

    /// `GET /outcomes`.
    pub async fn outcomes(&self, search_key: &str) -> Result<Vec<Outcome>> {
        let env: ApiEnvelope<Vec<Outcome>> = self
            .get_json("/outcomes", &[("searchKey", search_key.to_string())])
            .await?;
        Ok(env.data)
    }

    /// `POST /incidents/reporters`.
    pub async fn reporters(&self, req: &ReporterFilterRequest) -> Result<Page<Reporter>> {
        let env: ApiEnvelope<Page<Reporter>> = self.post_json("/incidents/reporters", req).await?;
        Ok(env.data)
    }

    /// Load all four dropdown option lists concurrently. An already-chosen
    /// customer selection narrows the site list and vice versa.
    pub async fn filter_options(&self, selection: &FilterSelection) -> Result<FilterOptions> {
        let customer_req = CustomerFilterRequest {
            site_ids: selection.sites.clone(),
            ..Default::default()
        };
        let site_req = SiteFilterRequest {
            customer_ids: selection.customers.clone(),
            ..Default::default()
        };
        let reporter_req = ReporterFilterRequest::default();

        let (customers, sites, categories, reporters) = tokio::try_join!(
            self.filter_customers(&customer_req),
            self.filter_sites(&site_req),
            self.categories(),
            self.reporters(&reporter_req),
        )?;

        Ok(FilterOptions {
            customers: customers.content,
            sites: sites.content,
            categories,
            reporters: reporters.content,
        })
    }
}

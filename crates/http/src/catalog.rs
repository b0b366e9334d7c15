//! Hospital catalog over `GET /api/hospitals`.

use std::sync::Arc;

use async_trait::async_trait;

use arogya_discovery::core::HospitalCatalog;
use arogya_discovery::error::CollaboratorResult;
use arogya_discovery::types::{HospitalSummary, ResultPage};

use crate::client::ApiClient;
use crate::wire::HospitalListResponse;

const SERVICE: &str = "hospital-catalog";
const HOSPITALS_PATH: &str = "api/hospitals";

/// Maximum suggestions requested per type-ahead lookup.
pub const SUGGESTION_LIMIT: u32 = 5;

/// [`HospitalCatalog`] backed by the REST API.
#[derive(Clone)]
pub struct HttpCatalog {
    client: Arc<ApiClient>,
}

impl HttpCatalog {
    /// Creates a catalog over a shared client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HospitalCatalog for HttpCatalog {
    async fn search(
        &self,
        term: &str,
        specialty: Option<&str>,
        page: u32,
    ) -> CollaboratorResult<ResultPage> {
        let page = page.max(1);
        let mut query = vec![
            ("name", term.to_string()),
            ("page", page.to_string()),
            ("limit", self.client.page_size().to_string()),
        ];
        if let Some(specialty) = specialty {
            query.push(("specialty", specialty.to_string()));
        }

        let response: HospitalListResponse =
            self.client.get_json(SERVICE, HOSPITALS_PATH, &query).await?;
        Ok(response.into_page(page))
    }

    async fn suggest(&self, query: &str) -> CollaboratorResult<Vec<HospitalSummary>> {
        let params = [
            ("name", query.to_string()),
            ("page", "1".to_string()),
            ("limit", SUGGESTION_LIMIT.to_string()),
        ];
        let response: HospitalListResponse =
            self.client.get_json(SERVICE, HOSPITALS_PATH, &params).await?;
        Ok(response
            .data
            .into_iter()
            .take(SUGGESTION_LIMIT as usize)
            .map(HospitalSummary::from)
            .collect())
    }
}

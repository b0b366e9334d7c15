//! Hospital catalog collaborator.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CollaboratorResult;
use crate::types::{HospitalSummary, ResultPage};

/// Remote hospital catalog.
#[async_trait]
pub trait HospitalCatalog: Send + Sync {
    /// Fetches one page of hospitals matching a term and optional specialty.
    ///
    /// # Arguments
    ///
    /// * `term` - Free text matched against hospital names; may be empty
    /// * `specialty` - Specialty tag, `None` for all specialties
    /// * `page` - 1-based page number
    async fn search(
        &self,
        term: &str,
        specialty: Option<&str>,
        page: u32,
    ) -> CollaboratorResult<ResultPage>;

    /// Returns type-ahead suggestions for a non-empty query.
    async fn suggest(&self, query: &str) -> CollaboratorResult<Vec<HospitalSummary>>;
}

/// Shared catalog handle.
pub type DynCatalog = Arc<dyn HospitalCatalog>;

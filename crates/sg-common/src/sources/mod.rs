//! Upstream access traits and the raw record shapes they return.
//!
//! The pipeline core never talks to the network or a database directly; it
//! consumes these traits. `sg-clients` ships the production implementations,
//! tests supply in-memory fakes.

pub mod records;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use records::{
    ContentConsumptionRow, ContentHierarchyRow, RatingSummaryRow, SearchHit, TaxonomyCompetency,
    TaxonomyFilters, UserProfileRow,
};

/// A failed upstream fetch. Fatal for the run: extractors never retry and the
/// orchestrator never partially publishes.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("upstream request to {service} failed: {message}")]
    Upstream { service: String, message: String },
    #[error("unexpected {service} response: {message}")]
    UnexpectedResponse { service: String, message: String },
    #[error("storage read failed: {0}")]
    Storage(String),
}

impl SourceError {
    pub fn upstream(service: &str, message: impl ToString) -> Self {
        SourceError::Upstream {
            service: service.to_string(),
            message: message.to_string(),
        }
    }

    pub fn unexpected(service: &str, message: impl ToString) -> Self {
        SourceError::UnexpectedResponse {
            service: service.to_string(),
            message: message.to_string(),
        }
    }
}

/// External competency taxonomy service.
#[async_trait]
pub trait TaxonomyClient: Send + Sync {
    /// Search the catalog. Empty filters mean unrestricted.
    async fn search(&self, filters: &TaxonomyFilters) -> Result<Vec<TaxonomyCompetency>, SourceError>;
}

/// Search index over published content.
#[async_trait]
pub trait SearchIndexClient: Send + Sync {
    /// All hits for documents with `status=Live` and `category=Course`.
    async fn live_courses(&self) -> Result<Vec<SearchHit>, SourceError>;
}

/// Analytical query engine accepting SQL-style query strings.
#[async_trait]
pub trait AnalyticsClient: Send + Sync {
    /// Run a query and return its tabular result as one JSON object per row.
    async fn query(&self, sql: &str) -> Result<Vec<Value>, SourceError>;
}

/// Read path over the column-family store, one scan per source table.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn scan_rating_summaries(&self) -> Result<Vec<RatingSummaryRow>, SourceError>;
    async fn scan_content_consumption(&self) -> Result<Vec<ContentConsumptionRow>, SourceError>;
    async fn scan_content_hierarchy(&self) -> Result<Vec<ContentHierarchyRow>, SourceError>;
    async fn scan_user_profiles(&self) -> Result<Vec<UserProfileRow>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn upstream_errors_name_the_service_in_display() {
        let err = SourceError::upstream("taxonomy", "connection refused");
        assert_eq!(
            err.to_string(),
            "upstream request to taxonomy failed: connection refused"
        );
        // The service name is plain context, not a chained error cause.
        assert!(err.source().is_none());
    }

    #[test]
    fn unexpected_responses_name_the_service_in_display() {
        let err = SourceError::unexpected("search-index", "missing hits");
        assert_eq!(
            err.to_string(),
            "unexpected search-index response: missing hits"
        );
        assert!(err.source().is_none());
    }
}

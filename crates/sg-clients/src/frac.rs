use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use sg_common::sources::{SourceError, TaxonomyClient, TaxonomyCompetency, TaxonomyFilters};

const SOURCE: &str = "taxonomy";

/// HTTP client for the external competency taxonomy service.
pub struct FracClient {
    http: reqwest::Client,
    search_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    competencies: Vec<TaxonomyCompetency>,
}

impl FracClient {
    pub fn new(http: reqwest::Client, search_url: String, api_key: Option<String>) -> Self {
        Self {
            http,
            search_url,
            api_key,
        }
    }
}

/// Flatten a raw search response body into its competency list.
pub fn parse_search_response(body: Value) -> Result<Vec<TaxonomyCompetency>, SourceError> {
    let response: SearchResponse =
        serde_json::from_value(body).map_err(|err| SourceError::unexpected(SOURCE, err))?;
    Ok(response.result.competencies)
}

#[async_trait]
impl TaxonomyClient for FracClient {
    async fn search(
        &self,
        filters: &TaxonomyFilters,
    ) -> Result<Vec<TaxonomyCompetency>, SourceError> {
        let mut request = self
            .http
            .post(&self.search_url)
            .json(&serde_json::json!({ "filters": filters }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|err| SourceError::upstream(SOURCE, err))?;
        let body: Value = response
            .json()
            .await
            .map_err(|err| SourceError::unexpected(SOURCE, err))?;

        let competencies = parse_search_response(body)?;
        debug!(count = competencies.len(), "fetched taxonomy competencies");
        Ok(competencies)
    }
}

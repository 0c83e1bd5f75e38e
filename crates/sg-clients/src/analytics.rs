use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use sg_common::sources::{AnalyticsClient, SourceError};

const SOURCE: &str = "analytics";

/// Client for the analytical query engine's SQL endpoint. The engine answers
/// a query string with a JSON array of row objects.
pub struct SqlAnalyticsClient {
    http: reqwest::Client,
    sql_url: String,
}

impl SqlAnalyticsClient {
    pub fn new(http: reqwest::Client, sql_url: String) -> Self {
        Self { http, sql_url }
    }
}

/// An analytical result must be an array of row objects.
pub fn parse_result_rows(body: Value) -> Result<Vec<Value>, SourceError> {
    match body {
        Value::Array(rows) => Ok(rows),
        other => Err(SourceError::unexpected(
            SOURCE,
            format!("expected a row array, got {other}"),
        )),
    }
}

#[async_trait]
impl AnalyticsClient for SqlAnalyticsClient {
    async fn query(&self, sql: &str) -> Result<Vec<Value>, SourceError> {
        let response = self
            .http
            .post(&self.sql_url)
            .json(&json!({ "query": sql }))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|err| SourceError::upstream(SOURCE, err))?;
        let body: Value = response
            .json()
            .await
            .map_err(|err| SourceError::unexpected(SOURCE, err))?;

        let rows = parse_result_rows(body)?;
        debug!(rows = rows.len(), "analytical query returned");
        Ok(rows)
    }
}

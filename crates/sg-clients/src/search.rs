use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use sg_common::sources::{SearchHit, SearchIndexClient, SourceError};

const SOURCE: &str = "search-index";
const PAGE_SIZE: usize = 500;

/// Client for the composite search index over published content.
pub struct CompositeSearchClient {
    http: reqwest::Client,
    search_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    total: u64,
    #[serde(default)]
    hits: Vec<SearchHit>,
}

impl CompositeSearchClient {
    pub fn new(http: reqwest::Client, search_url: String) -> Self {
        Self { http, search_url }
    }

    fn page_request(&self, from: usize) -> Value {
        json!({
            "query": {
                "bool": {
                    "filter": [
                        {"term": {"status": "Live"}},
                        {"term": {"primaryCategory": "Course"}}
                    ]
                }
            },
            "_source": ["identifier"],
            "from": from,
            "size": PAGE_SIZE
        })
    }
}

/// Decode one search response page into (hits, reported total).
pub fn parse_search_page(body: Value) -> Result<(Vec<SearchHit>, u64), SourceError> {
    let response: SearchResponse =
        serde_json::from_value(body).map_err(|err| SourceError::unexpected(SOURCE, err))?;
    Ok((response.hits.hits, response.hits.total))
}

#[async_trait]
impl SearchIndexClient for CompositeSearchClient {
    async fn live_courses(&self) -> Result<Vec<SearchHit>, SourceError> {
        let mut collected = Vec::new();

        // One response is capped upstream; page until the reported total.
        loop {
            let response = self
                .http
                .post(&self.search_url)
                .json(&self.page_request(collected.len()))
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|err| SourceError::upstream(SOURCE, err))?;
            let body: Value = response
                .json()
                .await
                .map_err(|err| SourceError::unexpected(SOURCE, err))?;

            let (hits, total) = parse_search_page(body)?;
            if hits.is_empty() {
                break;
            }
            collected.extend(hits);
            if collected.len() as u64 >= total {
                break;
            }
        }

        debug!(count = collected.len(), "fetched live course hits");
        Ok(collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hits_and_total() {
        let body = json!({
            "hits": {
                "total": 2,
                "hits": [
                    {"_source": {"identifier": "c1"}},
                    {"_source": {"identifier": "c2"}}
                ]
            }
        });

        let (hits, total) = parse_search_page(body).unwrap();

        assert_eq!(total, 2);
        assert_eq!(hits[1].source.identifier, "c2");
    }

    #[test]
    fn empty_page_parses() {
        let (hits, total) = parse_search_page(json!({"hits": {"total": 0}})).unwrap();
        assert!(hits.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn page_request_filters_live_courses() {
        let client = CompositeSearchClient::new(reqwest::Client::new(), "http://x".into());
        let request = client.page_request(500);

        assert_eq!(request["from"], 500);
        assert_eq!(
            request["query"]["bool"]["filter"][0]["term"]["status"],
            "Live"
        );
        assert_eq!(
            request["query"]["bool"]["filter"][1]["term"]["primaryCategory"],
            "Course"
        );
    }
}

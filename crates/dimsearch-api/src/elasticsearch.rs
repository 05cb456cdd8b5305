//! HTTP client for the Elasticsearch search backend.

use crate::highlight::HighlightMarkers;
use crate::models::BackendResponse;
use crate::query::SearchRequest;
use async_trait::async_trait;
use dimsearch_common::{Error, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::json;
use std::time::Duration;
use tracing::warn;

/// Search backend collaborator as seen by the handlers.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a bounded dimension query against the named index.
    async fn query_dimension(&self, index: &str, request: &SearchRequest)
        -> Result<BackendResponse>;

    /// Create the named index with the dimension option mapping.
    async fn create_index(&self, index: &str) -> Result<()>;

    /// Delete the named index.
    async fn delete_index(&self, index: &str) -> Result<()>;
}

/// Configuration for the Elasticsearch client.
#[derive(Debug, Clone)]
pub struct ElasticsearchClientConfig {
    /// Base URL of the cluster (e.g. "http://localhost:10200")
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries for failed requests
    pub max_retries: u32,
    /// Initial retry delay
    pub retry_delay: Duration,
}

impl Default for ElasticsearchClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:10200".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_delay: Duration::from_millis(100),
        }
    }
}

/// Pooled HTTP client for the search backend.
#[derive(Clone)]
pub struct ElasticsearchClient {
    client: Client,
    config: ElasticsearchClientConfig,
    markers: HighlightMarkers,
}

impl ElasticsearchClient {
    pub fn new(config: ElasticsearchClientConfig, markers: HighlightMarkers) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| Error::Upstream(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            markers,
        })
    }

    /// Send a request, retrying connection failures and 5xx responses with
    /// exponential backoff. 4xx responses are returned immediately.
    async fn send_with_retry(
        &self,
        request_fn: impl Fn() -> RequestBuilder,
    ) -> Result<reqwest::Response> {
        let mut last_error = None;
        let mut delay = self.config.retry_delay;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tokio::time::sleep(delay).await;
                delay *= 2;
                warn!(attempt, "retrying search backend request");
            }

            match request_fn().send().await {
                Ok(response) if response.status().is_server_error() => {
                    last_error = Some(format!("search backend returned {}", response.status()));
                }
                Ok(response) => return Ok(response),
                Err(e) => last_error = Some(format!("request failed: {}", e)),
            }
        }

        Err(Error::Upstream(format!(
            "search backend unreachable after {} attempts: {}",
            self.config.max_retries + 1,
            last_error.unwrap_or_else(|| "unknown error".to_string()),
        )))
    }

    // Query bodies ask the backend to wrap matched substrings in the
    // reserved markers; the mapper turns those back into offsets.
    fn search_body(&self, request: &SearchRequest) -> serde_json::Value {
        json!({
            "from": request.offset,
            "size": request.limit,
            "query": {
                "bool": {
                    "should": [
                        { "match": { "code": { "query": request.term, "boost": 2.0 } } },
                        { "match": { "label": { "query": request.term } } }
                    ]
                }
            },
            "highlight": {
                "pre_tags": [self.markers.start],
                "post_tags": [self.markers.end],
                "fields": {
                    "code": { "number_of_fragments": 0 },
                    "label": { "number_of_fragments": 0 }
                }
            }
        })
    }
}

#[async_trait]
impl SearchBackend for ElasticsearchClient {
    async fn query_dimension(
        &self,
        index: &str,
        request: &SearchRequest,
    ) -> Result<BackendResponse> {
        let url = format!("{}/{}/_search", self.config.base_url, index);
        let body = self.search_body(request);

        let response = self
            .send_with_retry(|| self.client.post(&url).json(&body))
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::NotFound(format!("search index {}", index))),
            status if status.is_success() => response.json().await.map_err(|e| {
                Error::Upstream(format!("failed to parse search response: {}", e))
            }),
            status => Err(Error::Upstream(format!(
                "search backend returned {} for index {}",
                status, index
            ))),
        }
    }

    async fn create_index(&self, index: &str) -> Result<()> {
        let url = format!("{}/{}", self.config.base_url, index);
        let body = json!({
            "mappings": {
                "properties": {
                    "code": { "type": "text" },
                    "label": { "type": "text" },
                    "has_data": { "type": "boolean" },
                    "number_of_children": { "type": "long" }
                }
            }
        });

        let response = self
            .send_with_retry(|| self.client.put(&url).json(&body))
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Error::Upstream(format!(
            "index creation returned {} for index {}",
            status, index
        )))
    }

    async fn delete_index(&self, index: &str) -> Result<()> {
        let url = format!("{}/{}", self.config.base_url, index);

        let response = self.send_with_retry(|| self.client.delete(&url)).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::NotFound(format!("search index {}", index))),
            status if status.is_success() => Ok(()),
            status => Err(Error::Upstream(format!(
                "index deletion returned {} for index {}",
                status, index
            ))),
        }
    }
}

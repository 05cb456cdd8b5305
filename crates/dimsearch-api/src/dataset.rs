//! HTTP client for the dataset API resource checks.

use async_trait::async_trait;
use dimsearch_common::{Error, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Header carrying the internal service credential to the dataset API.
const AUTH_HEADER: &str = "internal-token";

/// Dataset service collaborator: existence checks for versions and
/// instance dimensions, independent of the search backend.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Fetch the dataset version document, confirming it exists.
    async fn get_version(&self, dataset_id: &str, edition: &str, version: &str)
        -> Result<Version>;

    /// Confirm the instance carries the named dimension.
    async fn check_instance_dimension(&self, instance_id: &str, dimension: &str) -> Result<()>;
}

/// Subset of the version document the gateway reads. The `id` field is the
/// instance behind the version and names the search index.
#[derive(Debug, Clone, Deserialize)]
pub struct Version {
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct Dimensions {
    #[serde(default)]
    items: Vec<Dimension>,
}

#[derive(Debug, Deserialize)]
struct Dimension {
    name: String,
}

/// Configuration for the dataset API client.
#[derive(Debug, Clone)]
pub struct DatasetClientConfig {
    /// Base URL of the dataset API
    pub base_url: String,
    /// Service credential attached to requests; `None` for the web
    /// deployment, where unpublished resources must stay invisible
    pub service_token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

/// Pooled HTTP client for the dataset API.
#[derive(Clone)]
pub struct DatasetClient {
    client: Client,
    config: DatasetClientConfig,
}

impl DatasetClient {
    pub fn new(config: DatasetClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| Error::Upstream(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.service_token {
            Some(token) => request.header(AUTH_HEADER, token),
            None => request,
        }
    }

    async fn get(&self, url: &str, resource: &str) -> Result<reqwest::Response> {
        let response = self
            .apply_auth(self.client.get(url))
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("dataset API unreachable: {}", e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::NotFound(resource.to_string())),
            status if status.is_success() => Ok(response),
            status => Err(Error::Upstream(format!(
                "dataset API returned {} for {}",
                status, resource
            ))),
        }
    }
}

#[async_trait]
impl DatasetStore for DatasetClient {
    async fn get_version(
        &self,
        dataset_id: &str,
        edition: &str,
        version: &str,
    ) -> Result<Version> {
        let url = format!(
            "{}/datasets/{}/editions/{}/versions/{}",
            self.config.base_url, dataset_id, edition, version
        );
        let response = self.get(&url, "dataset version").await?;
        response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("failed to parse version document: {}", e)))
    }

    async fn check_instance_dimension(&self, instance_id: &str, dimension: &str) -> Result<()> {
        let url = format!("{}/instances/{}/dimensions", self.config.base_url, instance_id);
        let response = self.get(&url, "instance").await?;
        let dimensions: Dimensions = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("failed to parse dimensions: {}", e)))?;

        if dimensions.items.iter().any(|d| d.name == dimension) {
            Ok(())
        } else {
            Err(Error::NotFound(format!(
                "dimension {} on instance {}",
                dimension, instance_id
            )))
        }
    }
}

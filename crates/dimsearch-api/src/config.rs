//! Environment-driven service configuration.

use std::fmt;
use std::time::Duration;

/// Gateway configuration, populated from environment variables with
/// defaults suitable for local development.
#[derive(Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Public base URL used to build dimension option URLs
    pub host: String,
    /// Base URL of the dataset API
    pub dataset_api_url: String,
    /// Base URL of the Elasticsearch cluster
    pub elasticsearch_url: String,
    /// Kafka bootstrap servers, comma separated
    pub brokers: String,
    /// Topic the index-built event is published to
    pub hierarchy_built_topic: String,
    /// Limit applied when the request carries none
    pub default_max_results: usize,
    /// Upper bound on the `offset` parameter
    pub max_search_results_offset: usize,
    /// Whether the index management endpoints are served
    pub has_private_endpoints: bool,
    /// Token expected in the identity header on private endpoints,
    /// also attached to dataset API calls in private mode
    pub service_auth_token: String,
    /// Bounded retry count for collaborator clients
    pub max_retries: u32,
    /// Drain window applied during shutdown
    pub graceful_shutdown_timeout: Duration,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:23100"),
            host: env_or("SEARCH_API_URL", "http://localhost:23100"),
            dataset_api_url: env_or("DATASET_API_URL", "http://localhost:22000"),
            elasticsearch_url: env_or("ELASTIC_SEARCH_URL", "http://localhost:10200"),
            brokers: env_or("KAFKA_ADDR", "localhost:9092"),
            hierarchy_built_topic: env_or("HIERARCHY_BUILT_TOPIC", "hierarchy-built"),
            default_max_results: env_parse_or("DEFAULT_MAX_RESULTS", 20),
            max_search_results_offset: env_parse_or("MAX_SEARCH_RESULTS_OFFSET", 1000),
            has_private_endpoints: env_parse_or("ENABLE_PRIVATE_ENDPOINTS", true),
            service_auth_token: env_or("SERVICE_AUTH_TOKEN", ""),
            max_retries: env_parse_or("REQUEST_MAX_RETRIES", 3),
            graceful_shutdown_timeout: Duration::from_secs(env_parse_or(
                "GRACEFUL_SHUTDOWN_TIMEOUT_SECS",
                5,
            )),
        }
    }
}

// Manual Debug so the auth token never reaches the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("host", &self.host)
            .field("dataset_api_url", &self.dataset_api_url)
            .field("elasticsearch_url", &self.elasticsearch_url)
            .field("brokers", &self.brokers)
            .field("hierarchy_built_topic", &self.hierarchy_built_topic)
            .field("default_max_results", &self.default_max_results)
            .field("max_search_results_offset", &self.max_search_results_offset)
            .field("has_private_endpoints", &self.has_private_endpoints)
            .field("max_retries", &self.max_retries)
            .field("graceful_shutdown_timeout", &self.graceful_shutdown_timeout)
            .finish()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

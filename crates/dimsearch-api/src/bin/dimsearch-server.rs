//! Dimension search gateway entry point.

use dimsearch_api::{
    Config, DatasetClient, DatasetClientConfig, ElasticsearchClient, ElasticsearchClientConfig,
    HighlightMarkers, KafkaOutputQueue, SearchApi,
};
use dimsearch_common::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "dimsearch_api=info".to_string());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();
    info!(?config, "starting dimension search gateway");

    let markers = HighlightMarkers::default();

    let backend = Arc::new(ElasticsearchClient::new(
        ElasticsearchClientConfig {
            base_url: config.elasticsearch_url.clone(),
            max_retries: config.max_retries,
            ..ElasticsearchClientConfig::default()
        },
        markers,
    )?);

    // In web mode the dataset client sends no credentials, so unpublished
    // versions come back 404 like anything else that does not exist.
    let service_token = config
        .has_private_endpoints
        .then(|| config.service_auth_token.clone())
        .filter(|token| !token.is_empty());
    let dataset = Arc::new(DatasetClient::new(DatasetClientConfig {
        base_url: config.dataset_api_url.clone(),
        service_token,
        timeout: Duration::from_secs(30),
    })?);

    let queue = Arc::new(KafkaOutputQueue::new(
        &config.brokers,
        config.hierarchy_built_topic.clone(),
    )?);

    let api = Arc::new(SearchApi::new(
        &config,
        dataset,
        backend,
        queue.clone(),
    ));
    let app = api.router().layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("failed to listen for shutdown signal: {}", e);
            }
            info!("os signal received, draining requests");
        })
        .await?;

    // Requests have drained; flush outstanding queue deliveries last.
    if let Err(e) = queue.close(config.graceful_shutdown_timeout) {
        error!("error while closing kafka producer: {}", e);
    }
    info!("shutdown complete");
    Ok(())
}

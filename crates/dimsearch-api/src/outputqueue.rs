//! Kafka publisher for index-built completion events.

use async_trait::async_trait;
use dimsearch_common::{Error, Result};
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Event emitted once a dimension's search index has been created, telling
/// the downstream build pipeline it can start populating the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexBuilt {
    pub instance_id: String,
    pub dimension_name: String,
}

/// Queue collaborator as seen by the handlers. Delivery is at-least-once;
/// reconciliation after a partial failure belongs to the consumer.
#[async_trait]
pub trait OutputQueue: Send + Sync {
    async fn queue_index_built(&self, event: &IndexBuilt) -> Result<()>;
}

/// Kafka-backed output queue.
pub struct KafkaOutputQueue {
    producer: FutureProducer,
    topic: String,
}

impl KafkaOutputQueue {
    /// Connect a producer to the given bootstrap servers.
    pub fn new(brokers: &str, topic: String) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()
            .map_err(|e| Error::Configuration(format!("failed to create producer: {}", e)))?;

        Ok(Self { producer, topic })
    }

    /// Flush outstanding deliveries, called during shutdown after the
    /// server has stopped accepting requests.
    pub fn close(&self, timeout: Duration) -> Result<()> {
        self.producer
            .flush(timeout)
            .map_err(|e| Error::Upstream(format!("failed to flush producer: {}", e)))
    }
}

#[async_trait]
impl OutputQueue for KafkaOutputQueue {
    async fn queue_index_built(&self, event: &IndexBuilt) -> Result<()> {
        let payload = serde_json::to_vec(event)
            .map_err(|e| Error::Upstream(format!("failed to encode event: {}", e)))?;

        let record = FutureRecord::to(&self.topic)
            .key(&event.instance_id)
            .payload(&payload);

        self.producer
            .send(record, Duration::from_secs(5))
            .await
            .map_err(|(e, _)| Error::Upstream(format!("failed to publish event: {}", e)))?;

        info!(
            instance_id = %event.instance_id,
            dimension = %event.dimension_name,
            topic = %self.topic,
            "queued index-built event"
        );
        Ok(())
    }
}

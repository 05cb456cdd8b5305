//! Search gateway for per-dimension full-text indices.
//!
//! Accepts dimension-search queries over HTTP, bounds them, delegates
//! matching to the search backend and reshapes the raw hit list into an
//! offset-accurate response. Also manages the create/delete lifecycle of
//! per-dimension indices behind an internal identity check, publishing a
//! completion event to Kafka when an index has been created.

pub mod api;
pub mod auth;
pub mod config;
pub mod dataset;
pub mod elasticsearch;
pub mod handlers;
pub mod highlight;
pub mod mapper;
pub mod models;
pub mod outputqueue;
pub mod query;

pub use api::SearchApi;
pub use config::Config;
pub use dataset::{DatasetClient, DatasetClientConfig, DatasetStore};
pub use elasticsearch::{ElasticsearchClient, ElasticsearchClientConfig, SearchBackend};
pub use highlight::HighlightMarkers;
pub use outputqueue::{IndexBuilt, KafkaOutputQueue, OutputQueue};

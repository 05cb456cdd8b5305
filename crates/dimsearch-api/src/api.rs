//! Router assembly and injected collaborator state.

use crate::auth::require_identity;
use crate::config::Config;
use crate::dataset::DatasetStore;
use crate::elasticsearch::SearchBackend;
use crate::handlers::{
    create_search_index, delete_search_index, dimension_search, health_check,
};
use crate::highlight::HighlightMarkers;
use crate::outputqueue::OutputQueue;
use crate::query::QueryBounds;
use axum::routing::{get, put};
use axum::{middleware, Router};
use std::sync::Arc;

/// Shared state behind every request: collaborator clients constructed once
/// at startup plus the configuration the handlers read. Nothing here is
/// mutated after construction.
pub struct SearchApi {
    pub dataset: Arc<dyn DatasetStore>,
    pub backend: Arc<dyn SearchBackend>,
    pub queue: Arc<dyn OutputQueue>,
    pub markers: HighlightMarkers,
    pub host: String,
    pub bounds: QueryBounds,
    pub has_private_endpoints: bool,
    pub service_auth_token: String,
}

impl SearchApi {
    pub fn new(
        config: &Config,
        dataset: Arc<dyn DatasetStore>,
        backend: Arc<dyn SearchBackend>,
        queue: Arc<dyn OutputQueue>,
    ) -> Self {
        Self {
            dataset,
            backend,
            queue,
            markers: HighlightMarkers::default(),
            host: config.host.clone(),
            bounds: QueryBounds {
                default_limit: config.default_max_results,
                max_offset: config.max_search_results_offset,
            },
            has_private_endpoints: config.has_private_endpoints,
            service_auth_token: config.service_auth_token.clone(),
        }
    }

    /// Assemble the route table. The index management routes only exist in
    /// private deployments; elsewhere they fall through to the router's own
    /// 404, indistinguishable from any unknown path.
    pub fn router(self: Arc<Self>) -> Router {
        let mut router = Router::new()
            .route("/health", get(health_check))
            .route(
                "/search/datasets/:id/editions/:edition/versions/:version/dimensions/:name",
                get(dimension_search),
            );

        if self.has_private_endpoints {
            let private = Router::new()
                .route(
                    "/search/instances/:instance_id/dimensions/:dimension",
                    put(create_search_index).delete(delete_search_index),
                )
                .route_layer(middleware::from_fn_with_state(
                    self.clone(),
                    require_identity,
                ));
            router = router.merge(private);
        }

        router.with_state(self)
    }
}

//! HTTP request handlers for the search gateway.

use crate::api::SearchApi;
use crate::mapper::{self, SearchPath};
use crate::models::SearchResults;
use crate::outputqueue::IndexBuilt;
use crate::query::{self, SearchParams};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use dimsearch_common::Error;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Body returned for every 404, whether the resource is missing or the
/// caller failed the identity check.
pub const NOT_FOUND_BODY: &str = "Resource not found";

/// Fixed body for internal failures; upstream error detail never reaches
/// the client.
pub const INTERNAL_ERROR_BODY: &str = "Failed to process the request due to an internal error";

/// Gateway error as it leaves the HTTP surface.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.0;
        if error.is_client_error() {
            return (StatusCode::BAD_REQUEST, error.to_string()).into_response();
        }
        if matches!(error, Error::NotFound(_)) {
            debug!(%error, "resource not found");
            return (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response();
        }
        if error.is_defect() {
            // Contract violation, not transient unavailability.
            error!(%error, "search backend highlight contract violated");
        } else {
            error!(%error, "failed to process request");
        }
        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check handler
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Dimension search: validate, confirm the version exists, query the
/// backend index and reshape the hits into the response envelope.
pub async fn dimension_search(
    State(api): State<Arc<SearchApi>>,
    Path((dataset_id, edition, version, name)): Path<(String, String, String, String)>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
    let request = query::validate(&params, api.bounds)?;

    // The version document names the instance backing this dimension,
    // which in turn names the index.
    let version_doc = api.dataset.get_version(&dataset_id, &edition, &version).await?;
    let index = format!("{}_{}", version_doc.id, name);

    let response = api.backend.query_dimension(&index, &request).await?;

    let results = mapper::build_search_results(
        &request,
        SearchPath {
            dataset_id: &dataset_id,
            edition: &edition,
            version: &version,
            dimension: &name,
        },
        &api.host,
        api.markers,
        response,
    )?;

    debug!(
        index = %index,
        count = results.count,
        returned = results.items.len(),
        "dimension search complete"
    );
    Ok(Json(results))
}

/// Create the search index for an instance dimension and tell the build
/// pipeline about it.
pub async fn create_search_index(
    State(api): State<Arc<SearchApi>>,
    Path((instance_id, dimension)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    api.dataset
        .check_instance_dimension(&instance_id, &dimension)
        .await?;

    let index = format!("{}_{}", instance_id, dimension);
    api.backend.create_index(&index).await?;

    let event = IndexBuilt {
        instance_id,
        dimension_name: dimension,
    };
    // The index exists at this point; a failed publish is reported to the
    // caller and reconciled downstream (at-least-once delivery).
    api.queue.queue_index_built(&event).await.map_err(|e| {
        Error::Upstream(format!("index {} created but event publish failed: {}", index, e))
    })?;

    info!(index = %index, "search index created");
    Ok(StatusCode::OK)
}

/// Delete the search index for an instance dimension.
pub async fn delete_search_index(
    State(api): State<Arc<SearchApi>>,
    Path((instance_id, dimension)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let index = format!("{}_{}", instance_id, dimension);
    api.backend.delete_index(&index).await?;

    info!(index = %index, "search index deleted");
    Ok(StatusCode::OK)
}

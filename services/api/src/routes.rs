use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use hireflow::workflows::documents::{
    collection_router, CollectionStore, DocumentCollectionService, DocumentType, StatusNotifier,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct DocumentTypesResponse {
    pub(crate) document_types: Vec<DocumentType>,
}

pub(crate) fn with_collection_routes<S, N>(
    service: Arc<DocumentCollectionService<S, N>>,
) -> axum::Router
where
    S: CollectionStore + 'static,
    N: StatusNotifier + 'static,
{
    collection_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/document-types",
            axum::routing::get(document_types_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Expose the accepted document-type tags so intake forms stay in sync with
/// the server-side catalog.
pub(crate) async fn document_types_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<DocumentTypesResponse> {
    Json(DocumentTypesResponse {
        document_types: state.catalog.types().to_vec(),
    })
}

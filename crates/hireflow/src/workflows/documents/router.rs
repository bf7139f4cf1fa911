use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{
    CollectionSubmission, RejectSubmission, RequestId, UploadSubmission, VerifySubmission,
};
use super::notify::StatusNotifier;
use super::repository::{CollectionStore, StoreError};
use super::service::{CollectionError, DocumentCollectionService};

/// Router builder exposing HTTP endpoints for the collection lifecycle.
pub fn collection_router<S, N>(service: Arc<DocumentCollectionService<S, N>>) -> Router
where
    S: CollectionStore + 'static,
    N: StatusNotifier + 'static,
{
    Router::new()
        .route("/api/v1/collections", post(create_handler::<S, N>))
        .route("/api/v1/collections/:request_id", get(show_handler::<S, N>))
        .route(
            "/api/v1/collections/:request_id/documents",
            post(upload_handler::<S, N>),
        )
        .route(
            "/api/v1/collections/:request_id/verify",
            post(verify_handler::<S, N>),
        )
        .route(
            "/api/v1/collections/:request_id/reject",
            post(reject_handler::<S, N>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<S, N>(
    State(service): State<Arc<DocumentCollectionService<S, N>>>,
    axum::Json(submission): axum::Json<CollectionSubmission>,
) -> Response
where
    S: CollectionStore + 'static,
    N: StatusNotifier + 'static,
{
    match service.create(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn show_handler<S, N>(
    State(service): State<Arc<DocumentCollectionService<S, N>>>,
    Path(request_id): Path<String>,
) -> Response
where
    S: CollectionStore + 'static,
    N: StatusNotifier + 'static,
{
    let id = RequestId(request_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn upload_handler<S, N>(
    State(service): State<Arc<DocumentCollectionService<S, N>>>,
    Path(request_id): Path<String>,
    axum::Json(submission): axum::Json<UploadSubmission>,
) -> Response
where
    S: CollectionStore + 'static,
    N: StatusNotifier + 'static,
{
    let id = RequestId(request_id);
    match service.upload(&id, submission) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn verify_handler<S, N>(
    State(service): State<Arc<DocumentCollectionService<S, N>>>,
    Path(request_id): Path<String>,
    axum::Json(submission): axum::Json<VerifySubmission>,
) -> Response
where
    S: CollectionStore + 'static,
    N: StatusNotifier + 'static,
{
    let id = RequestId(request_id);
    match service.verify(&id, submission) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reject_handler<S, N>(
    State(service): State<Arc<DocumentCollectionService<S, N>>>,
    Path(request_id): Path<String>,
    axum::Json(submission): axum::Json<RejectSubmission>,
) -> Response
where
    S: CollectionStore + 'static,
    N: StatusNotifier + 'static,
{
    let id = RequestId(request_id);
    match service.reject(&id, submission) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

/// Map service errors onto the wire contract: caller mistakes are 422,
/// unknown ids are 404, illegal or raced transitions are 409.
fn error_response(error: CollectionError) -> Response {
    let status = match &error {
        CollectionError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CollectionError::NotFound(_) => StatusCode::NOT_FOUND,
        CollectionError::InvalidTransition(_) => StatusCode::CONFLICT,
        CollectionError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        CollectionError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

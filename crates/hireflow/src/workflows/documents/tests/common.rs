use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::documents::domain::{
    CollectionPatch, CollectionRequest, CollectionStatus, CollectionSubmission, DocumentCatalog,
    FileUpload, RejectSubmission, RequestId, StoredDocument, UploadSubmission, VerifySubmission,
};
use crate::workflows::documents::memory::InMemoryCollectionStore;
use crate::workflows::documents::notify::{NotifyError, StatusChangeEvent, StatusNotifier};
use crate::workflows::documents::repository::{CollectionStore, StoreError};
use crate::workflows::documents::{collection_router, DocumentCollectionService};

pub(super) fn submission() -> CollectionSubmission {
    CollectionSubmission {
        candidate_name: "Jane Doe".to_string(),
        candidate_email: "jane.doe@example.com".to_string(),
        document_types: vec!["pan-card".to_string(), "aadhaar".to_string()],
        custom_message: Some("Please upload within five business days.".to_string()),
    }
}

pub(super) fn file_upload(name: &str) -> FileUpload {
    FileUpload {
        name: name.to_string(),
        content_type: "application/pdf".to_string(),
        size: 48_213,
        storage_key: format!("uploads/{name}"),
    }
}

pub(super) fn stored_file(name: &str) -> StoredDocument {
    StoredDocument {
        name: name.to_string(),
        content_type: "application/pdf".to_string(),
        size: 48_213,
        storage_key: format!("uploads/{name}"),
        uploaded_at: Utc::now(),
    }
}

pub(super) fn upload_submission(names: &[&str]) -> UploadSubmission {
    UploadSubmission {
        files: names.iter().map(|name| file_upload(name)).collect(),
        corrected_name: None,
        corrected_email: None,
    }
}

pub(super) fn verify_submission(reviewer: &str) -> VerifySubmission {
    VerifySubmission {
        verified_by: reviewer.to_string(),
        notes: None,
    }
}

pub(super) fn reject_submission(reviewer: &str, reason: &str) -> RejectSubmission {
    RejectSubmission {
        rejected_by: reviewer.to_string(),
        reason: reason.to_string(),
    }
}

pub(super) fn build_service() -> (
    DocumentCollectionService<InMemoryCollectionStore, RecordingNotifier>,
    Arc<InMemoryCollectionStore>,
    Arc<RecordingNotifier>,
) {
    let store = Arc::new(InMemoryCollectionStore::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = DocumentCollectionService::new(
        store.clone(),
        notifier.clone(),
        DocumentCatalog::default(),
    );
    (service, store, notifier)
}

/// Create a request and push one file through so it sits in `uploaded`.
pub(super) fn uploaded_request(
    service: &DocumentCollectionService<InMemoryCollectionStore, RecordingNotifier>,
) -> RequestId {
    let record = service.create(submission()).expect("create succeeds");
    service
        .upload(&record.id, upload_submission(&["id-card.pdf"]))
        .expect("upload succeeds");
    record.id
}

#[derive(Default, Clone)]
pub(super) struct RecordingNotifier {
    events: Arc<Mutex<Vec<StatusChangeEvent>>>,
}

impl RecordingNotifier {
    pub(super) fn events(&self) -> Vec<StatusChangeEvent> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl StatusNotifier for RecordingNotifier {
    fn notify(&self, event: &StatusChangeEvent) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(event.clone());
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl StatusNotifier for FailingNotifier {
    fn notify(&self, _event: &StatusChangeEvent) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery("sink offline".to_string()))
    }
}

pub(super) struct ConflictStore;

impl CollectionStore for ConflictStore {
    fn insert(&self, _record: CollectionRequest) -> Result<CollectionRequest, StoreError> {
        Err(StoreError::Conflict)
    }

    fn fetch(&self, _id: &RequestId) -> Result<Option<CollectionRequest>, StoreError> {
        Ok(None)
    }

    fn update_if_status(
        &self,
        _id: &RequestId,
        _expected: CollectionStatus,
        _patch: CollectionPatch,
    ) -> Result<CollectionRequest, StoreError> {
        Err(StoreError::Unavailable("read only".to_string()))
    }
}

pub(super) struct UnavailableStore;

impl CollectionStore for UnavailableStore {
    fn insert(&self, _record: CollectionRequest) -> Result<CollectionRequest, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &RequestId) -> Result<Option<CollectionRequest>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update_if_status(
        &self,
        _id: &RequestId,
        _expected: CollectionStatus,
        _patch: CollectionPatch,
    ) -> Result<CollectionRequest, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

/// Store that can sneak one competing write in between a caller's read and
/// its conditional update, so race-loser behavior is testable without
/// real thread timing.
pub(super) struct ContendedStore {
    inner: InMemoryCollectionStore,
    interloper: Mutex<Option<(CollectionStatus, CollectionPatch)>>,
}

impl ContendedStore {
    pub(super) fn new() -> Self {
        Self {
            inner: InMemoryCollectionStore::default(),
            interloper: Mutex::new(None),
        }
    }

    /// Queue a write that lands right before the next conditional update.
    pub(super) fn arm(&self, expected: CollectionStatus, patch: CollectionPatch) {
        *self.interloper.lock().expect("interloper mutex poisoned") = Some((expected, patch));
    }
}

impl CollectionStore for ContendedStore {
    fn insert(&self, record: CollectionRequest) -> Result<CollectionRequest, StoreError> {
        self.inner.insert(record)
    }

    fn fetch(&self, id: &RequestId) -> Result<Option<CollectionRequest>, StoreError> {
        self.inner.fetch(id)
    }

    fn update_if_status(
        &self,
        id: &RequestId,
        expected: CollectionStatus,
        patch: CollectionPatch,
    ) -> Result<CollectionRequest, StoreError> {
        let armed = self
            .interloper
            .lock()
            .expect("interloper mutex poisoned")
            .take();
        if let Some((race_expected, race_patch)) = armed {
            self.inner.update_if_status(id, race_expected, race_patch)?;
        }
        self.inner.update_if_status(id, expected, patch)
    }
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn collection_router_with_service(
    service: DocumentCollectionService<InMemoryCollectionStore, RecordingNotifier>,
) -> axum::Router {
    collection_router(Arc::new(service))
}

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use super::domain::{
    CollectionPatch, CollectionRequest, CollectionStatus, CollectionSubmission, DocumentCatalog,
    RejectSubmission, RequestId, ReviewerId, UploadSubmission, VerifySubmission,
};
use super::intake::{IntakeGuard, ValidationError};
use super::notify::{StatusChangeEvent, StatusNotifier};
use super::repository::{CollectionStore, StoreError};
use super::state::{transition, CollectionEvent, InvalidTransition};

/// Service composing the intake guard, store, and notification sinks.
pub struct DocumentCollectionService<S, N> {
    guard: Arc<IntakeGuard>,
    store: Arc<S>,
    notifier: Arc<N>,
}

impl<S, N> DocumentCollectionService<S, N>
where
    S: CollectionStore + 'static,
    N: StatusNotifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, catalog: DocumentCatalog) -> Self {
        Self {
            guard: Arc::new(IntakeGuard::with_catalog(catalog)),
            store,
            notifier,
        }
    }

    /// Issue a new collection request for a candidate.
    pub fn create(
        &self,
        submission: CollectionSubmission,
    ) -> Result<CollectionRequest, CollectionError> {
        let intake = self.guard.collection_from_submission(submission)?;
        let record = CollectionRequest::issue(RequestId::generate(), intake, Utc::now());
        let stored = self.store.insert(record)?;
        Ok(stored)
    }

    /// Record candidate uploads, moving the request into `uploaded` when the
    /// first files arrive. Later uploads append onto the existing batch.
    pub fn upload(
        &self,
        id: &RequestId,
        submission: UploadSubmission,
    ) -> Result<CollectionRequest, CollectionError> {
        let received_at = Utc::now();
        let batch = self.guard.documents_from_submission(submission, received_at)?;
        let current = self.fetch_existing(id)?;
        transition(current.status, CollectionEvent::Upload)?;

        let patch = CollectionPatch::AppendDocuments {
            files: batch.files,
            corrected_name: batch.corrected_name,
            corrected_email: batch.corrected_email,
            uploaded_at: received_at,
        };
        self.apply_guarded(id, current.status, CollectionEvent::Upload, patch)
    }

    /// Confirm the uploaded documents. The request becomes terminal.
    pub fn verify(
        &self,
        id: &RequestId,
        submission: VerifySubmission,
    ) -> Result<CollectionRequest, CollectionError> {
        let current = self.fetch_existing(id)?;
        transition(current.status, CollectionEvent::Verify)?;

        let decided_at = Utc::now();
        let patch = CollectionPatch::MarkVerified {
            verified_by: ReviewerId(submission.verified_by),
            verified_at: decided_at,
        };
        let updated = self.apply_guarded(id, current.status, CollectionEvent::Verify, patch)?;
        self.announce(&updated, current.status, decided_at, submission.notes);
        Ok(updated)
    }

    /// Send the documents back with a mandatory reason. The request becomes
    /// terminal.
    pub fn reject(
        &self,
        id: &RequestId,
        submission: RejectSubmission,
    ) -> Result<CollectionRequest, CollectionError> {
        let rejection = self.guard.rejection_from_submission(submission)?;
        let current = self.fetch_existing(id)?;
        transition(current.status, CollectionEvent::Reject)?;

        let decided_at = Utc::now();
        let detail = rejection.reason.clone();
        let patch = CollectionPatch::MarkRejected {
            rejected_by: rejection.rejected_by,
            rejected_at: decided_at,
            reason: rejection.reason,
        };
        let updated = self.apply_guarded(id, current.status, CollectionEvent::Reject, patch)?;
        self.announce(&updated, current.status, decided_at, Some(detail));
        Ok(updated)
    }

    /// Fetch a request and current status for API responses.
    pub fn get(&self, id: &RequestId) -> Result<CollectionRequest, CollectionError> {
        self.fetch_existing(id)
    }

    fn fetch_existing(&self, id: &RequestId) -> Result<CollectionRequest, CollectionError> {
        self.store
            .fetch(id)?
            .ok_or_else(|| CollectionError::NotFound(id.clone()))
    }

    /// Legality was already decided against the status read above; the store
    /// guard only defends that read against concurrent writers. A mismatch
    /// means this caller lost the race.
    fn apply_guarded(
        &self,
        id: &RequestId,
        expected: CollectionStatus,
        event: CollectionEvent,
        patch: CollectionPatch,
    ) -> Result<CollectionRequest, CollectionError> {
        match self.store.update_if_status(id, expected, patch) {
            Ok(updated) => Ok(updated),
            Err(StoreError::NotFound) => Err(CollectionError::NotFound(id.clone())),
            Err(StoreError::StatusMismatch { actual }) => Err(CollectionError::InvalidTransition(
                InvalidTransition {
                    from: actual,
                    event,
                },
            )),
            Err(other) => Err(CollectionError::Store(other)),
        }
    }

    /// Committed transitions are announced best-effort. A delivery failure
    /// is logged and swallowed, never rolled back or retried.
    fn announce(
        &self,
        record: &CollectionRequest,
        previous: CollectionStatus,
        occurred_at: DateTime<Utc>,
        detail: Option<String>,
    ) {
        let event = StatusChangeEvent {
            request_id: record.id.clone(),
            previous_status: previous,
            new_status: record.status,
            occurred_at,
            detail,
        };
        if let Err(error) = self.notifier.notify(&event) {
            warn!(request_id = %record.id, %error, "status change notification dropped");
        }
    }
}

/// Error raised by the collection service.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("collection request {0} not found")]
    NotFound(RequestId),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error(transparent)]
    Store(#[from] StoreError),
}

//! Candidate document collection lifecycle.
//!
//! A collection request moves from `requested` through candidate upload to a
//! terminal HR decision (`verified` or `rejected`). Every mutation runs
//! through one transition authority and a status-guarded conditional update
//! so concurrent callers can never both win the same change.

pub mod domain;
pub mod intake;
pub mod memory;
pub mod notify;
pub mod repository;
pub mod router;
pub mod service;
pub mod state;

#[cfg(test)]
mod tests;

pub use domain::{
    CollectionPatch, CollectionRequest, CollectionStatus, CollectionSubmission, CollectionView,
    DocumentCatalog, DocumentType, FileUpload, NewCollection, RejectSubmission, RequestId,
    ReviewerId, StoredDocument, UploadSubmission, VerifySubmission, DEFAULT_DOCUMENT_TYPES,
};
pub use intake::{IntakeGuard, ValidationError};
pub use memory::InMemoryCollectionStore;
pub use notify::{FanoutNotifier, NotifyError, StatusChangeEvent, StatusNotifier, TracingNotifier};
pub use repository::{CollectionStore, StoreError};
pub use router::collection_router;
pub use service::{CollectionError, DocumentCollectionService};
pub use state::{transition, CollectionEvent, InvalidTransition};

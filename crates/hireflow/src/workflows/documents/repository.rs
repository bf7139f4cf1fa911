use super::domain::{CollectionPatch, CollectionRequest, CollectionStatus, RequestId};

/// Storage abstraction so the service module can be exercised in isolation.
///
/// `update_if_status` is the concurrency guard for every mutation: the store
/// must apply the patch atomically and only while the record still carries
/// the expected status, reporting a mismatch instead of silently writing.
pub trait CollectionStore: Send + Sync {
    fn insert(&self, record: CollectionRequest) -> Result<CollectionRequest, StoreError>;
    fn fetch(&self, id: &RequestId) -> Result<Option<CollectionRequest>, StoreError>;
    fn update_if_status(
        &self,
        id: &RequestId,
        expected: CollectionStatus,
        patch: CollectionPatch,
    ) -> Result<CollectionRequest, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record status changed to {actual} since it was read")]
    StatusMismatch { actual: CollectionStatus },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

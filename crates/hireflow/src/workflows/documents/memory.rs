use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{CollectionPatch, CollectionRequest, CollectionStatus, RequestId};
use super::repository::{CollectionStore, StoreError};

/// Reference store keeping records in process memory. The mutex makes each
/// conditional update one atomic check-and-patch, which is the
/// serialization point the whole lifecycle leans on.
#[derive(Default, Clone)]
pub struct InMemoryCollectionStore {
    records: Arc<Mutex<HashMap<RequestId, CollectionRequest>>>,
}

impl CollectionStore for InMemoryCollectionStore {
    fn insert(&self, record: CollectionRequest) -> Result<CollectionRequest, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &RequestId) -> Result<Option<CollectionRequest>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update_if_status(
        &self,
        id: &RequestId,
        expected: CollectionStatus,
        patch: CollectionPatch,
    ) -> Result<CollectionRequest, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let current = guard.get(id).ok_or(StoreError::NotFound)?;
        if current.status != expected {
            return Err(StoreError::StatusMismatch {
                actual: current.status,
            });
        }

        let updated = current.clone().apply(patch);
        guard.insert(id.clone(), updated.clone());
        Ok(updated)
    }
}

use std::fmt;

use super::domain::CollectionStatus;

/// Mutation events a caller can attempt against a collection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionEvent {
    Upload,
    Verify,
    Reject,
}

impl CollectionEvent {
    pub const fn label(self) -> &'static str {
        match self {
            CollectionEvent::Upload => "upload",
            CollectionEvent::Verify => "verify",
            CollectionEvent::Reject => "reject",
        }
    }
}

impl fmt::Display for CollectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when an event is not legal from the current status. Also the
/// error handed to the loser of a concurrent mutation race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {event} a request in status {from}")]
pub struct InvalidTransition {
    pub from: CollectionStatus,
    pub event: CollectionEvent,
}

/// Sole authority on status legality. Every mutation path must obtain its
/// target status from here; nothing else may branch on status to decide
/// whether a change is allowed.
pub fn transition(
    from: CollectionStatus,
    event: CollectionEvent,
) -> Result<CollectionStatus, InvalidTransition> {
    match (from, event) {
        (CollectionStatus::Requested, CollectionEvent::Upload) => Ok(CollectionStatus::Uploaded),
        // Re-uploads append onto an already-uploaded record.
        (CollectionStatus::Uploaded, CollectionEvent::Upload) => Ok(CollectionStatus::Uploaded),
        (CollectionStatus::Uploaded, CollectionEvent::Verify) => Ok(CollectionStatus::Verified),
        (CollectionStatus::Uploaded, CollectionEvent::Reject) => Ok(CollectionStatus::Rejected),
        (from, event) => Err(InvalidTransition { from, event }),
    }
}

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for document collection requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    /// Mint a fresh identifier. Ids survive process restarts, so they are
    /// random rather than sequence-based.
    pub fn generate() -> Self {
        Self(format!("dcr-{}", uuid::Uuid::new_v4().simple()))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the HR reviewer who verified or rejected a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerId(pub String);

/// Normalized document-type tag (e.g. "pan-card") drawn from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentType(pub String);

/// Built-in document types offered when no catalog is configured.
pub const DEFAULT_DOCUMENT_TYPES: &[&str] = &[
    "aadhaar",
    "pan-card",
    "passport",
    "driving-license",
    "voter-id",
    "educational-certificates",
    "experience-letters",
    "salary-slips",
    "bank-statement",
    "resume",
    "photo",
];

/// Closed list of document-type tags a deployment accepts. Supplied as
/// configuration so the lifecycle never hardcodes the enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCatalog {
    types: Vec<DocumentType>,
}

impl DocumentCatalog {
    /// Build a catalog from raw tags. Entries are trimmed, lowercased, and
    /// deduplicated in first-seen order; an input with no usable entries
    /// falls back to the built-in list.
    pub fn new(types: impl IntoIterator<Item = String>) -> Self {
        let mut seen: Vec<DocumentType> = Vec::new();
        for raw in types {
            let tag = raw.trim().to_ascii_lowercase();
            if tag.is_empty() || seen.iter().any(|known| known.0 == tag) {
                continue;
            }
            seen.push(DocumentType(tag));
        }

        if seen.is_empty() {
            return Self::default();
        }

        Self { types: seen }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.types.iter().any(|known| known.0 == tag)
    }

    pub fn types(&self) -> &[DocumentType] {
        &self.types
    }
}

impl Default for DocumentCatalog {
    fn default() -> Self {
        Self {
            types: DEFAULT_DOCUMENT_TYPES
                .iter()
                .map(|tag| DocumentType((*tag).to_string()))
                .collect(),
        }
    }
}

/// Workflow state of a collection request. The transition rules live in the
/// `state` module; everything else treats this as an opaque tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
    Requested,
    Uploaded,
    Verified,
    Rejected,
}

impl CollectionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CollectionStatus::Requested => "requested",
            CollectionStatus::Uploaded => "uploaded",
            CollectionStatus::Verified => "verified",
            CollectionStatus::Rejected => "rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, CollectionStatus::Verified | CollectionStatus::Rejected)
    }
}

impl fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Descriptor of one uploaded file. Only the storage key is kept here; the
/// bytes live in object storage and are resolved by a downstream service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub name: String,
    pub content_type: String,
    pub size: u64,
    pub storage_key: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Inbound payload for issuing a new collection request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSubmission {
    pub candidate_name: String,
    pub candidate_email: String,
    pub document_types: Vec<String>,
    #[serde(default)]
    pub custom_message: Option<String>,
}

/// Inbound payload for a candidate upload. Contact corrections ride along
/// with the files so a candidate can fix a typo made by HR at issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSubmission {
    pub files: Vec<FileUpload>,
    #[serde(default)]
    pub corrected_name: Option<String>,
    #[serde(default)]
    pub corrected_email: Option<String>,
}

/// Untrusted descriptor of one file the candidate uploaded to object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    pub name: String,
    pub content_type: String,
    pub size: u64,
    pub storage_key: String,
}

/// Inbound payload for the verify decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifySubmission {
    pub verified_by: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Inbound payload for the reject decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectSubmission {
    pub rejected_by: String,
    pub reason: String,
}

/// Sanitized output of intake validation for `create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollection {
    pub candidate_name: String,
    pub candidate_email: String,
    pub document_types: Vec<DocumentType>,
    pub custom_message: Option<String>,
}

/// Sanitized output of intake validation for `upload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentBatch {
    pub files: Vec<StoredDocument>,
    pub corrected_name: Option<String>,
    pub corrected_email: Option<String>,
}

/// Sanitized output of intake validation for `reject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub rejected_by: ReviewerId,
    pub reason: String,
}

/// One candidate's document request, tracked from issuance to a terminal
/// verification decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRequest {
    pub id: RequestId,
    pub candidate_name: String,
    pub candidate_email: String,
    pub document_types: Vec<DocumentType>,
    pub documents: Vec<StoredDocument>,
    pub status: CollectionStatus,
    pub requested_at: DateTime<Utc>,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub verified_at: Option<DateTime<Utc>>,
    pub verified_by: Option<ReviewerId>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejected_by: Option<ReviewerId>,
    pub rejection_reason: Option<String>,
    pub custom_message: Option<String>,
}

impl CollectionRequest {
    /// Fresh record in the initial state.
    pub fn issue(id: RequestId, intake: NewCollection, requested_at: DateTime<Utc>) -> Self {
        Self {
            id,
            candidate_name: intake.candidate_name,
            candidate_email: intake.candidate_email,
            document_types: intake.document_types,
            documents: Vec::new(),
            status: CollectionStatus::Requested,
            requested_at,
            uploaded_at: None,
            verified_at: None,
            verified_by: None,
            rejected_at: None,
            rejected_by: None,
            rejection_reason: None,
            custom_message: intake.custom_message,
        }
    }

    /// Apply a patch, producing the updated record. Legality of the change
    /// is decided before the patch is built; application itself is
    /// mechanical so the store can run it under its own lock.
    pub fn apply(mut self, patch: CollectionPatch) -> Self {
        match patch {
            CollectionPatch::AppendDocuments {
                files,
                corrected_name,
                corrected_email,
                uploaded_at,
            } => {
                self.documents.extend(files);
                if let Some(name) = corrected_name {
                    self.candidate_name = name;
                }
                if let Some(email) = corrected_email {
                    self.candidate_email = email;
                }
                // Only the first upload stamps the record-level timestamp.
                if self.uploaded_at.is_none() {
                    self.uploaded_at = Some(uploaded_at);
                }
                self.status = CollectionStatus::Uploaded;
            }
            CollectionPatch::MarkVerified {
                verified_by,
                verified_at,
            } => {
                self.status = CollectionStatus::Verified;
                self.verified_at = Some(verified_at);
                self.verified_by = Some(verified_by);
            }
            CollectionPatch::MarkRejected {
                rejected_by,
                rejected_at,
                reason,
            } => {
                self.status = CollectionStatus::Rejected;
                self.rejected_at = Some(rejected_at);
                self.rejected_by = Some(rejected_by);
                self.rejection_reason = Some(reason);
            }
        }
        self
    }

    pub fn view(&self) -> CollectionView {
        CollectionView {
            request_id: self.id.clone(),
            candidate_name: self.candidate_name.clone(),
            candidate_email: self.candidate_email.clone(),
            document_types: self.document_types.clone(),
            documents: self.documents.clone(),
            status: self.status.label(),
            requested_at: self.requested_at,
            uploaded_at: self.uploaded_at,
            verified_at: self.verified_at,
            verified_by: self.verified_by.clone(),
            rejected_at: self.rejected_at,
            rejected_by: self.rejected_by.clone(),
            rejection_reason: self.rejection_reason.clone(),
            custom_message: self.custom_message.clone(),
        }
    }
}

/// Mutations the store applies under its conditional-update guard. Patches
/// carry only the delta so a stale reader can never clobber fields written
/// by a concurrent winner.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionPatch {
    AppendDocuments {
        files: Vec<StoredDocument>,
        corrected_name: Option<String>,
        corrected_email: Option<String>,
        uploaded_at: DateTime<Utc>,
    },
    MarkVerified {
        verified_by: ReviewerId,
        verified_at: DateTime<Utc>,
    },
    MarkRejected {
        rejected_by: ReviewerId,
        rejected_at: DateTime<Utc>,
        reason: String,
    },
}

/// Sanitized representation of a collection request for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionView {
    pub request_id: RequestId,
    pub candidate_name: String,
    pub candidate_email: String,
    pub document_types: Vec<DocumentType>,
    pub documents: Vec<StoredDocument>,
    pub status: &'static str,
    pub requested_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<ReviewerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_by: Option<ReviewerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
}

use chrono::{DateTime, Utc};
use validator::ValidateEmail;

use super::domain::{
    CollectionSubmission, DocumentBatch, DocumentCatalog, DocumentType, FileUpload, NewCollection,
    RejectSubmission, Rejection, ReviewerId, StoredDocument, UploadSubmission,
};

/// Validation errors raised by the intake guard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("candidate name must not be blank")]
    BlankCandidateName,
    #[error("candidate email is not valid: {0}")]
    InvalidEmail(String),
    #[error("at least one document type is required")]
    NoDocumentTypes,
    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),
    #[error("upload must include at least one file")]
    NoFiles,
    #[error("uploaded file has no name")]
    BlankFileName,
    #[error("file '{name}' has an unrecognized content type: {value}")]
    InvalidContentType { name: String, value: String },
    #[error("file '{0}' is missing its storage key")]
    MissingStorageKey(String),
    #[error("rejection reason must not be blank")]
    BlankRejectionReason,
}

/// Guard turning untrusted submissions into sanitized domain values.
#[derive(Debug, Clone)]
pub struct IntakeGuard {
    catalog: DocumentCatalog,
}

impl Default for IntakeGuard {
    fn default() -> Self {
        Self::with_catalog(DocumentCatalog::default())
    }
}

impl IntakeGuard {
    pub fn with_catalog(catalog: DocumentCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &DocumentCatalog {
        &self.catalog
    }

    /// Validate a request-issuance submission. Requested types are
    /// normalized against the catalog and deduplicated in request order.
    pub fn collection_from_submission(
        &self,
        submission: CollectionSubmission,
    ) -> Result<NewCollection, ValidationError> {
        let candidate_name = non_blank_name(submission.candidate_name)?;
        let candidate_email = valid_email(submission.candidate_email)?;

        if submission.document_types.is_empty() {
            return Err(ValidationError::NoDocumentTypes);
        }

        let mut document_types: Vec<DocumentType> = Vec::new();
        for raw in submission.document_types {
            let tag = raw.trim().to_ascii_lowercase();
            if !self.catalog.contains(&tag) {
                return Err(ValidationError::UnknownDocumentType(raw));
            }
            if document_types.iter().any(|known| known.0 == tag) {
                continue;
            }
            document_types.push(DocumentType(tag));
        }

        Ok(NewCollection {
            candidate_name,
            candidate_email,
            document_types,
            custom_message: submission.custom_message,
        })
    }

    /// Validate a candidate upload, stamping each accepted file with the
    /// shared receipt time.
    pub fn documents_from_submission(
        &self,
        submission: UploadSubmission,
        received_at: DateTime<Utc>,
    ) -> Result<DocumentBatch, ValidationError> {
        if submission.files.is_empty() {
            return Err(ValidationError::NoFiles);
        }

        let mut files = Vec::with_capacity(submission.files.len());
        for upload in submission.files {
            files.push(stored_document(upload, received_at)?);
        }

        let corrected_name = match submission.corrected_name {
            Some(name) => Some(non_blank_name(name)?),
            None => None,
        };
        let corrected_email = match submission.corrected_email {
            Some(email) => Some(valid_email(email)?),
            None => None,
        };

        Ok(DocumentBatch {
            files,
            corrected_name,
            corrected_email,
        })
    }

    /// Validate a reject decision. The reason must contain visible text but
    /// is otherwise stored verbatim.
    pub fn rejection_from_submission(
        &self,
        submission: RejectSubmission,
    ) -> Result<Rejection, ValidationError> {
        if submission.reason.trim().is_empty() {
            return Err(ValidationError::BlankRejectionReason);
        }

        Ok(Rejection {
            rejected_by: ReviewerId(submission.rejected_by),
            reason: submission.reason,
        })
    }
}

fn non_blank_name(name: String) -> Result<String, ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::BlankCandidateName);
    }
    Ok(name)
}

fn valid_email(email: String) -> Result<String, ValidationError> {
    if !email.validate_email() {
        return Err(ValidationError::InvalidEmail(email));
    }
    Ok(email)
}

fn stored_document(
    upload: FileUpload,
    received_at: DateTime<Utc>,
) -> Result<StoredDocument, ValidationError> {
    if upload.name.trim().is_empty() {
        return Err(ValidationError::BlankFileName);
    }

    if upload.content_type.parse::<mime::Mime>().is_err() {
        return Err(ValidationError::InvalidContentType {
            name: upload.name,
            value: upload.content_type,
        });
    }

    if upload.storage_key.trim().is_empty() {
        return Err(ValidationError::MissingStorageKey(upload.name));
    }

    Ok(StoredDocument {
        name: upload.name,
        content_type: upload.content_type,
        size: upload.size,
        storage_key: upload.storage_key,
        uploaded_at: received_at,
    })
}

use chrono::Utc;

use super::common::*;
use crate::workflows::documents::domain::{DocumentCatalog, DocumentType};
use crate::workflows::documents::intake::{IntakeGuard, ValidationError};

#[test]
fn create_submission_normalizes_and_deduplicates_types() {
    let guard = IntakeGuard::default();
    let mut raw = submission();
    raw.document_types = vec![
        " PAN-Card ".to_string(),
        "aadhaar".to_string(),
        "pan-card".to_string(),
    ];

    let intake = guard
        .collection_from_submission(raw)
        .expect("submission is valid");

    assert_eq!(
        intake.document_types,
        vec![
            DocumentType("pan-card".to_string()),
            DocumentType("aadhaar".to_string())
        ]
    );
}

#[test]
fn create_submission_rejects_unknown_type() {
    let guard = IntakeGuard::default();
    let mut raw = submission();
    raw.document_types.push("library-card".to_string());

    match guard.collection_from_submission(raw) {
        Err(ValidationError::UnknownDocumentType(tag)) => assert_eq!(tag, "library-card"),
        other => panic!("expected unknown document type, got {other:?}"),
    }
}

#[test]
fn create_submission_requires_types() {
    let guard = IntakeGuard::default();
    let mut raw = submission();
    raw.document_types.clear();

    match guard.collection_from_submission(raw) {
        Err(ValidationError::NoDocumentTypes) => {}
        other => panic!("expected missing types error, got {other:?}"),
    }
}

#[test]
fn create_submission_requires_well_formed_email() {
    let guard = IntakeGuard::default();
    let mut raw = submission();
    raw.candidate_email = "jane.doe-at-example.com".to_string();

    match guard.collection_from_submission(raw) {
        Err(ValidationError::InvalidEmail(email)) => {
            assert_eq!(email, "jane.doe-at-example.com")
        }
        other => panic!("expected invalid email, got {other:?}"),
    }
}

#[test]
fn create_submission_requires_visible_name() {
    let guard = IntakeGuard::default();
    let mut raw = submission();
    raw.candidate_name = "   ".to_string();

    match guard.collection_from_submission(raw) {
        Err(ValidationError::BlankCandidateName) => {}
        other => panic!("expected blank name error, got {other:?}"),
    }
}

#[test]
fn upload_requires_at_least_one_file() {
    let guard = IntakeGuard::default();

    match guard.documents_from_submission(upload_submission(&[]), Utc::now()) {
        Err(ValidationError::NoFiles) => {}
        other => panic!("expected empty upload error, got {other:?}"),
    }
}

#[test]
fn upload_rejects_malformed_content_type() {
    let guard = IntakeGuard::default();
    let mut raw = upload_submission(&["scan.pdf"]);
    raw.files[0].content_type = "pdf".to_string();

    match guard.documents_from_submission(raw, Utc::now()) {
        Err(ValidationError::InvalidContentType { name, value }) => {
            assert_eq!(name, "scan.pdf");
            assert_eq!(value, "pdf");
        }
        other => panic!("expected content type error, got {other:?}"),
    }
}

#[test]
fn upload_rejects_missing_storage_key() {
    let guard = IntakeGuard::default();
    let mut raw = upload_submission(&["scan.pdf"]);
    raw.files[0].storage_key = String::new();

    match guard.documents_from_submission(raw, Utc::now()) {
        Err(ValidationError::MissingStorageKey(name)) => assert_eq!(name, "scan.pdf"),
        other => panic!("expected storage key error, got {other:?}"),
    }
}

#[test]
fn upload_rejects_nameless_file() {
    let guard = IntakeGuard::default();
    let mut raw = upload_submission(&["scan.pdf"]);
    raw.files[0].name = " ".to_string();

    match guard.documents_from_submission(raw, Utc::now()) {
        Err(ValidationError::BlankFileName) => {}
        other => panic!("expected blank file name error, got {other:?}"),
    }
}

#[test]
fn upload_stamps_every_file_with_receipt_time() {
    let guard = IntakeGuard::default();
    let received_at = Utc::now();

    let batch = guard
        .documents_from_submission(upload_submission(&["one.pdf", "two.pdf"]), received_at)
        .expect("upload is valid");

    assert_eq!(batch.files.len(), 2);
    assert!(batch.files.iter().all(|file| file.uploaded_at == received_at));
}

#[test]
fn upload_validates_corrected_email() {
    let guard = IntakeGuard::default();
    let mut raw = upload_submission(&["scan.pdf"]);
    raw.corrected_email = Some("not-an-address".to_string());

    match guard.documents_from_submission(raw, Utc::now()) {
        Err(ValidationError::InvalidEmail(email)) => assert_eq!(email, "not-an-address"),
        other => panic!("expected invalid email, got {other:?}"),
    }
}

#[test]
fn upload_passes_valid_corrections_through() {
    let guard = IntakeGuard::default();
    let mut raw = upload_submission(&["scan.pdf"]);
    raw.corrected_name = Some("Jane A. Doe".to_string());
    raw.corrected_email = Some("jane.a.doe@example.com".to_string());

    let batch = guard
        .documents_from_submission(raw, Utc::now())
        .expect("upload is valid");

    assert_eq!(batch.corrected_name.as_deref(), Some("Jane A. Doe"));
    assert_eq!(
        batch.corrected_email.as_deref(),
        Some("jane.a.doe@example.com")
    );
}

#[test]
fn rejection_requires_visible_reason() {
    let guard = IntakeGuard::default();

    for blank in ["", "   ", "\t\n"] {
        match guard.rejection_from_submission(reject_submission("hr-7", blank)) {
            Err(ValidationError::BlankRejectionReason) => {}
            other => panic!("expected blank reason error for {blank:?}, got {other:?}"),
        }
    }
}

#[test]
fn rejection_reason_is_kept_verbatim() {
    let guard = IntakeGuard::default();

    let rejection = guard
        .rejection_from_submission(reject_submission("hr-7", "  scan too blurry  "))
        .expect("reason is acceptable");

    assert_eq!(rejection.reason, "  scan too blurry  ");
    assert_eq!(rejection.rejected_by.0, "hr-7");
}

#[test]
fn custom_catalog_restricts_accepted_types() {
    let catalog = DocumentCatalog::new(vec![
        "Passport".to_string(),
        "visa".to_string(),
        "passport".to_string(),
    ]);
    assert_eq!(
        catalog.types(),
        &[
            DocumentType("passport".to_string()),
            DocumentType("visa".to_string())
        ]
    );

    let guard = IntakeGuard::with_catalog(catalog);
    assert!(guard.catalog().contains("visa"));

    let mut raw = submission();
    raw.document_types = vec!["visa".to_string()];
    guard
        .collection_from_submission(raw)
        .expect("catalog type accepted");

    let mut rejected = submission();
    rejected.document_types = vec!["aadhaar".to_string()];
    match guard.collection_from_submission(rejected) {
        Err(ValidationError::UnknownDocumentType(tag)) => assert_eq!(tag, "aadhaar"),
        other => panic!("expected unknown document type, got {other:?}"),
    }
}

#[test]
fn empty_catalog_falls_back_to_builtin_list() {
    let catalog = DocumentCatalog::new(Vec::new());
    assert!(catalog.contains("resume"));
    assert!(catalog.contains("bank-statement"));
}

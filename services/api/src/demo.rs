use crate::infra::RecordingStatusSink;
use clap::Args;
use hireflow::config::AppConfig;
use hireflow::error::AppError;
use hireflow::workflows::documents::{
    CollectionSubmission, DocumentCatalog, DocumentCollectionService, FileUpload,
    InMemoryCollectionStore, RejectSubmission, UploadSubmission, VerifySubmission,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Candidate name for the walkthrough record.
    #[arg(long, default_value = "Priya Sharma")]
    pub(crate) candidate_name: String,
    /// Candidate email for the walkthrough record.
    #[arg(long, default_value = "priya.sharma@example.com")]
    pub(crate) candidate_email: String,
    /// Skip the rejection portion of the walkthrough.
    #[arg(long)]
    pub(crate) skip_rejection: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogArgs {
    /// Emit the catalog as JSON instead of a line listing.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Print the document-type catalog the service would accept, honoring any
/// `APP_DOCUMENT_TYPES` override.
pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = DocumentCatalog::new(config.documents.types);

    if args.json {
        match serde_json::to_string_pretty(catalog.types()) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("catalog unavailable: {}", err),
        }
        return Ok(());
    }

    println!("Accepted document types ({})", catalog.types().len());
    for tag in catalog.types() {
        println!("- {}", tag.0);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        candidate_name,
        candidate_email,
        skip_rejection,
    } = args;

    println!("Candidate document collection demo");

    let store = Arc::new(InMemoryCollectionStore::default());
    let sink = Arc::new(RecordingStatusSink::default());
    let service = Arc::new(DocumentCollectionService::new(
        store,
        sink.clone(),
        DocumentCatalog::default(),
    ));

    let record = match service.create(CollectionSubmission {
        candidate_name,
        candidate_email,
        document_types: vec![
            "pan-card".to_string(),
            "aadhaar".to_string(),
            "bank-statement".to_string(),
        ],
        custom_message: Some("Please upload within five business days.".to_string()),
    }) {
        Ok(record) => record,
        Err(err) => {
            println!("  Request refused: {}", err);
            return Ok(());
        }
    };
    println!("- Issued request {} -> status {}", record.id, record.status);

    let uploaded = match service.upload(
        &record.id,
        UploadSubmission {
            files: vec![
                demo_file("pan-card.pdf", 84_120),
                demo_file("aadhaar.pdf", 61_444),
                demo_file("bank-statement.pdf", 210_998),
            ],
            corrected_name: None,
            corrected_email: None,
        },
    ) {
        Ok(record) => record,
        Err(err) => {
            println!("  Upload refused: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Candidate uploaded {} files -> status {}",
        uploaded.documents.len(),
        uploaded.status
    );

    let verified = match service.verify(
        &record.id,
        VerifySubmission {
            verified_by: "hr-demo".to_string(),
            notes: Some("All documents legible and consistent.".to_string()),
        },
    ) {
        Ok(record) => record,
        Err(err) => {
            println!("  Verification refused: {}", err);
            return Ok(());
        }
    };
    println!("- HR verified the batch -> status {}", verified.status);

    match serde_json::to_string_pretty(&verified.view()) {
        Ok(json) => println!("  Final record payload:\n{}", json),
        Err(err) => println!("  Final record payload unavailable: {}", err),
    }

    if !skip_rejection {
        run_rejection_walkthrough(&service);
    }

    let events = sink.events();
    if events.is_empty() {
        println!("\nStatus change events: none dispatched");
    } else {
        println!("\nStatus change events");
        for event in events {
            let detail = event
                .detail
                .map(|detail| format!(" ({detail})"))
                .unwrap_or_default();
            println!(
                "  - {}: {} -> {}{}",
                event.request_id, event.previous_status, event.new_status, detail
            );
        }
    }

    Ok(())
}

fn run_rejection_walkthrough(
    service: &DocumentCollectionService<InMemoryCollectionStore, RecordingStatusSink>,
) {
    println!("\nRejection walkthrough");

    let record = match service.create(CollectionSubmission {
        candidate_name: "Rohan Mehta".to_string(),
        candidate_email: "rohan.m@example.com".to_string(),
        document_types: vec!["driving-license".to_string()],
        custom_message: None,
    }) {
        Ok(record) => record,
        Err(err) => {
            println!("  Request refused: {}", err);
            return;
        }
    };
    println!("- Issued request {} -> status {}", record.id, record.status);

    let uploaded = match service.upload(
        &record.id,
        UploadSubmission {
            files: vec![FileUpload {
                name: "driving-license.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                size: 48_213,
                storage_key: "demo-uploads/driving-license.jpg".to_string(),
            }],
            corrected_name: None,
            corrected_email: Some("rohan.mehta@example.com".to_string()),
        },
    ) {
        Ok(record) => record,
        Err(err) => {
            println!("  Upload refused: {}", err);
            return;
        }
    };
    println!(
        "- Candidate uploaded with a corrected email: {}",
        uploaded.candidate_email
    );

    let rejected = match service.reject(
        &record.id,
        RejectSubmission {
            rejected_by: "hr-demo".to_string(),
            reason: "Licence photo is cropped; please rescan both sides.".to_string(),
        },
    ) {
        Ok(record) => record,
        Err(err) => {
            println!("  Rejection refused: {}", err);
            return;
        }
    };
    println!(
        "- HR sent the documents back -> status {} ({})",
        rejected.status,
        rejected
            .rejection_reason
            .as_deref()
            .unwrap_or("no reason recorded")
    );
}

fn demo_file(name: &str, size: u64) -> FileUpload {
    FileUpload {
        name: name.to_string(),
        content_type: "application/pdf".to_string(),
        size,
        storage_key: format!("demo-uploads/{name}"),
    }
}

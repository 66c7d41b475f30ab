//! Document upload endpoints

use axum::{
    body::Bytes,
    extract::{multipart::Field, Multipart, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::response::{BatchUploadResponse, UploadResponse};
use crate::types::{Document, FileType, UploadOutcome};

/// Multipart field of the single-file route
const SINGLE_FIELD: &str = "document";
/// Multipart field of the batch route
const BATCH_FIELD: &str = "documents";

/// One file read from a multipart body
struct Upload {
    filename: String,
    content_type: Option<String>,
    data: Bytes,
}

async fn read_upload(field: Field<'_>, max_size: usize) -> Result<Upload> {
    let filename = field
        .file_name()
        .map(str::to_string)
        .unwrap_or_else(|| "upload".to_string());
    let content_type = field.content_type().map(str::to_string);

    let data = field
        .bytes()
        .await
        .map_err(|e| Error::BadRequest(format!("Failed to read file '{}': {}", filename, e)))?;

    if data.len() > max_size {
        return Err(Error::BadRequest(format!(
            "File '{}' is too large. Maximum size is {} MB.",
            filename,
            max_size / (1024 * 1024)
        )));
    }

    Ok(Upload {
        filename,
        content_type,
        data,
    })
}

/// Extract, chunk and store one upload
async fn ingest(state: &AppState, upload: Upload) -> Result<UploadResponse> {
    state.documents().read().ensure_capacity()?;

    let file_type = FileType::detect(&upload.filename, upload.content_type.as_deref());
    if !file_type.is_supported() {
        return Err(Error::UnsupportedFileType(
            upload.content_type.unwrap_or(upload.filename),
        ));
    }

    tracing::info!(
        "Processing file: {} ({}, {} bytes)",
        upload.filename,
        file_type.display_name(),
        upload.data.len()
    );

    let pipeline = state.pipeline();
    let processed = tokio::task::spawn_blocking(move || {
        pipeline.process(
            &upload.filename,
            upload.content_type.as_deref(),
            &upload.data,
        )
    })
    .await
    .map_err(|e| Error::Internal(format!("Extraction task failed: {}", e)))??;

    let mut store = state.documents().write();
    let char_count = processed.char_count;
    let doc = store.insert(Document::new(processed.filename, processed.chunks))?;
    let response = UploadResponse::from(doc);
    tracing::info!(
        "Stored {} as {} ({} chars, {} documents, {} chunks in memory)",
        response.filename,
        response.document_id,
        char_count,
        store.len(),
        store.total_chunks()
    );
    Ok(response)
}

/// POST /api/upload - Upload a single document (field `document`)
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let max_size = state.config().server.max_file_size;

    // full store is rejected before the body is read
    state.documents().read().ensure_capacity()?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some(SINGLE_FIELD) {
            continue;
        }

        let upload = read_upload(field, max_size).await?;
        let response = ingest(&state, upload).await?;
        return Ok(Json(response));
    }

    Err(Error::NoFileUploaded)
}

/// POST /api/upload/multiple - Upload several documents (field `documents`).
///
/// Every file gets its own outcome; files past the store capacity fail
/// individually while earlier ones are kept.
pub async fn upload_documents(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchUploadResponse>> {
    let max_size = state.config().server.max_file_size;
    let max_files = state.config().server.max_files_per_upload;

    let mut uploads = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some(BATCH_FIELD) {
            continue;
        }
        if uploads.len() == max_files {
            return Err(Error::BadRequest(format!(
                "Too many files. Maximum is {} per upload.",
                max_files
            )));
        }
        uploads.push(read_upload(field, max_size).await?);
    }

    if uploads.is_empty() {
        return Err(Error::NoFileUploaded);
    }

    let mut results = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let filename = upload.filename.clone();
        let outcome = match ingest(&state, upload).await {
            Ok(stored) => UploadOutcome::from(stored),
            Err(e) => UploadOutcome::failed(filename, e),
        };
        if let UploadOutcome::Err { reason, .. } = &outcome {
            tracing::warn!("Upload of '{}' failed: {}", outcome.filename(), reason);
        }
        results.push(outcome);
    }

    let stored = results.iter().filter(|r| r.is_ok()).count();
    tracing::info!("Batch upload: {}/{} files stored", stored, results.len());

    Ok(Json(BatchUploadResponse {
        success: true,
        results,
    }))
}

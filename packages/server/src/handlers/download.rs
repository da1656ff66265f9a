use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::handlers::{DOCX_CONTENT_TYPE, PDF_CONTENT_TYPE, content_disposition_value};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/download/{filename}",
    tag = "Downloads",
    operation_id = "downloadDocument",
    summary = "Download a single document",
    description = "Forces a download of one PDF or Word document from the asset directory. \
        Filenames containing path separators or traversal sequences are rejected.",
    params(("filename" = String, Path, description = "Document filename")),
    responses(
        (status = 200, description = "Document stream", content_type = "application/pdf"),
        (status = 400, description = "Invalid filename (INVALID_REQUEST)", body = ErrorBody),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn download_document(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let path = state.resolver.resolve_download(&filename)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let content_type = match extension.as_str() {
        "docx" => DOCX_CONTENT_TYPE,
        _ => PDF_CONTENT_TYPE,
    };

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to open document: {e}")))?;
    let metadata = file
        .metadata()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to stat document: {e}")))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, metadata.len().to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value("attachment", filename.trim()),
        )
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

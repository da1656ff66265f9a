use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::AppError;
use crate::handlers::{
    DOCX_CONTENT_TYPE, IMMUTABLE_CACHE, PDF_CONTENT_TYPE, content_disposition_value,
};
use crate::state::AppState;

/// Serves a file from the asset directory with browser-friendly headers.
///
/// PDFs render inline and both PDFs and Word documents get an immutable
/// cache policy. Anything else falls back to a guessed content type.
#[instrument(skip(state))]
pub async fn serve_attached_asset(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let path = state.resolver.resolve_static(&filename)?;

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to open asset: {e}")))?;
    let metadata = file
        .metadata()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to stat asset: {e}")))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_LENGTH, metadata.len().to_string());
    let builder = match extension.as_str() {
        "pdf" => builder
            .header(header::CONTENT_TYPE, PDF_CONTENT_TYPE)
            .header(header::CONTENT_DISPOSITION, "inline")
            .header(header::CACHE_CONTROL, IMMUTABLE_CACHE),
        "docx" => builder
            .header(header::CONTENT_TYPE, DOCX_CONTENT_TYPE)
            .header(
                header::CONTENT_DISPOSITION,
                content_disposition_value("attachment", filename.trim()),
            )
            .header(header::CACHE_CONTROL, IMMUTABLE_CACHE),
        _ => builder.header(
            header::CONTENT_TYPE,
            mime_guess::from_path(&path).first_or_octet_stream().as_ref(),
        ),
    };

    builder
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

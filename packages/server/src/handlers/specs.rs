use std::io::{self, Write};

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::Response;
use common::assets::{AssetError, StreamSink, plan_pdf_bundle, write_bundle};
use tokio::sync::mpsc;
use tokio::task;
use tracing::{debug, error, instrument};

use crate::error::{AppError, ErrorBody};
use crate::handlers::content_disposition_value;
use crate::state::AppState;

const CHANNEL_DEPTH: usize = 8;

/// Bridges the blocking archive writer to the async response body.
///
/// Dropping the receiving half (client disconnect) surfaces as a broken
/// pipe, which unwinds the writer task.
struct ChannelWriter {
    tx: mpsc::Sender<Result<Bytes, io::Error>>,
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.tx
            .blocking_send(Ok(Bytes::copy_from_slice(buf)))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "response stream closed"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Body over the writer channel. An `Err` item makes hyper abort the
/// connection instead of emitting the terminating chunk, so a client can
/// never mistake a truncated archive for a complete one.
fn bundle_body(rx: mpsc::Receiver<Result<Bytes, io::Error>>) -> Body {
    Body::from_stream(futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (chunk, rx))
    }))
}

#[utoipa::path(
    get,
    path = "/download-all-specs",
    tag = "Downloads",
    operation_id = "downloadAllSpecs",
    summary = "Download every technical specification as one ZIP",
    description = "Bundles all PDF datasheets in the asset directory into a single ZIP \
        archive, streamed as it is built. Upload timestamps are stripped from the entry names.",
    responses(
        (status = 200, description = "ZIP archive stream", content_type = "application/zip"),
        (status = 404, description = "No technical specifications found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn download_all_specs(State(state): State<AppState>) -> Result<Response, AppError> {
    let assets_dir = state.config.assets.dir.clone();
    let entries = task::spawn_blocking(move || plan_pdf_bundle(&assets_dir))
        .await
        .map_err(|e| AppError::Internal(format!("Bundle planning task failed: {e}")))??;

    let (tx, rx) = mpsc::channel::<Result<Bytes, io::Error>>(CHANNEL_DEPTH);
    task::spawn_blocking(move || {
        let sink = StreamSink::new(ChannelWriter { tx: tx.clone() });
        let result = write_bundle(&entries, sink)
            .and_then(|sink| sink.finish().map_err(AssetError::from_sink));
        match result {
            Ok(_) => debug!(entries = entries.len(), "specification bundle streamed"),
            Err(AssetError::Aborted) => debug!("client disconnected during bundle stream"),
            Err(e) => {
                error!("specification bundle failed mid-stream: {e}");
                let _ = tx.blocking_send(Err(io::Error::other(e)));
            }
        }
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value("attachment", &state.config.archive.bundle_name),
        )
        .body(bundle_body(rx))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

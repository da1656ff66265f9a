use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::catalog::DatasheetRecord;
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/datasheets/{filename}",
    tag = "Products",
    operation_id = "getDatasheet",
    summary = "Get structured datasheet tables for a published PDF",
    params(("filename" = String, Path, description = "Datasheet PDF filename")),
    responses(
        (status = 200, description = "Datasheet content", body = DatasheetRecord),
        (status = 404, description = "Datasheet not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_datasheet(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<DatasheetRecord>, AppError> {
    state
        .datasheets
        .get(&filename)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Datasheet '{filename}' not found")))
}

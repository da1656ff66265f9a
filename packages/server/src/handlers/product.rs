use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::catalog::{ProductQuery, SolarPanel};
use crate::error::{AppError, ErrorBody};
use crate::extractors::AppQuery;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<SolarPanel>,
    /// Number of panels matching the filters.
    pub matched: usize,
    /// Total number of panels in the catalog.
    pub total: usize,
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "Products",
    operation_id = "listProducts",
    summary = "List solar panels",
    description = "Lists the panels in the catalog, optionally narrowed by search text, \
        power band, module type, application, series or brand. Filters combine with AND.",
    params(ProductQuery),
    responses(
        (status = 200, description = "Matching panels", body = ProductListResponse),
        (status = 400, description = "Malformed query parameters (INVALID_REQUEST)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ProductQuery>,
) -> Json<ProductListResponse> {
    let products: Vec<SolarPanel> = state
        .catalog
        .filter(&query)
        .into_iter()
        .cloned()
        .collect();
    let matched = products.len();
    Json(ProductListResponse {
        products,
        matched,
        total: state.catalog.len(),
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Products",
    operation_id = "getProduct",
    summary = "Get a single solar panel",
    params(("id" = String, Path, description = "Panel ID")),
    responses(
        (status = 200, description = "Panel details", body = SolarPanel),
        (status = 404, description = "Panel not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SolarPanel>, AppError> {
    state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product '{id}' not found")))
}

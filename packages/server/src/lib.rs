pub mod catalog;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Solstice Solar API",
        version = "1.0.0",
        description = "Catalog and datasheet delivery API for the Solstice Solar storefront"
    ),
    paths(
        handlers::download::download_document,
        handlers::specs::download_all_specs,
        handlers::product::list_products,
        handlers::product::get_product,
        handlers::datasheet::get_datasheet,
    ),
    components(schemas(
        error::ErrorBody,
        catalog::SolarPanel,
        catalog::PanelDetails,
        catalog::PowerBand,
        catalog::DatasheetRecord,
        handlers::product::ProductListResponse,
    )),
    tags(
        (name = "Downloads", description = "Datasheet and document downloads"),
        (name = "Products", description = "Solar panel catalog"),
    )
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let api = ApiDoc::openapi();

    axum::Router::new()
        .merge(routes::asset_routes())
        .nest("/api", routes::api_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
        .layer(TraceLayer::new_for_http())
}

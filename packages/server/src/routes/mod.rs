mod v1;

use axum::Router;
use axum::routing::get;

use crate::handlers;
use crate::state::AppState;

/// Routes served at the site root: raw assets and document downloads.
pub fn asset_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/attached_assets/{filename}",
            get(handlers::assets::serve_attached_asset),
        )
        .route(
            "/download/{filename}",
            get(handlers::download::download_document),
        )
        .route(
            "/download-all-specs",
            get(handlers::specs::download_all_specs),
        )
}

pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/v1", v1::routes())
}

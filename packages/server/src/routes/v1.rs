use axum::Router;
use axum::routing::get;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(handlers::product::list_products))
        .route("/products/{id}", get(handlers::product::get_product))
        .route(
            "/datasheets/{filename}",
            get(handlers::datasheet::get_datasheet),
        )
}

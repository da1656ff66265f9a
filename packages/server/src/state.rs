use std::sync::Arc;

use common::assets::AssetResolver;

use crate::catalog::{Catalog, DatasheetRegistry};
use crate::config::AppConfig;

/// Shared application state, constructed once at process start and
/// cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub resolver: Arc<AssetResolver>,
    pub catalog: Arc<Catalog>,
    pub datasheets: Arc<DatasheetRegistry>,
}

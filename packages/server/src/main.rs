use std::sync::Arc;

use anyhow::Context;
use common::assets::AssetResolver;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::catalog::{Catalog, DatasheetRegistry};
use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load config")?;

    let resolver = AssetResolver::new(&config.assets.dir).with_context(|| {
        format!(
            "Failed to open asset directory {}",
            config.assets.dir.display()
        )
    })?;
    let catalog = Catalog::load().context("Failed to load product catalog")?;
    let datasheets = DatasheetRegistry::load().context("Failed to load datasheet tables")?;
    info!(
        panels = catalog.len(),
        datasheets = datasheets.len(),
        "Catalog loaded"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        resolver: Arc::new(resolver),
        catalog: Arc::new(catalog),
        datasheets: Arc::new(datasheets),
        config,
    };
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Directory holding the datasheet PDFs and site assets, managed
    /// out-of-band and read-only at request time.
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArchiveConfig {
    /// Filename presented for the all-specifications ZIP download.
    pub bundle_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub assets: AssetsConfig,
    pub archive: ArchiveConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("assets.dir", "attached_assets")?
            .set_default(
                "archive.bundle_name",
                "Technical_Specifications_Complete.zip",
            )?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., SOLSTICE__SERVER__PORT)
            .add_source(Environment::with_prefix("SOLSTICE").separator("__"))
            .build()?;

        let mut cfg: Self = s.try_deserialize()?;

        // Deployment platforms inject a bare PORT; it wins over everything.
        if let Ok(port) = std::env::var("PORT") {
            cfg.server.port = port
                .parse()
                .map_err(|_| ConfigError::Message(format!("invalid PORT value: {port}")))?;
        }

        Ok(cfg)
    }
}

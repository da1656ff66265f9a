use std::net::SocketAddr;
use std::sync::Arc;

use ::common::assets::AssetResolver;
use reqwest::Client;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tempfile::TempDir;

use server::catalog::{Catalog, DatasheetRegistry};
use server::config::{AppConfig, ArchiveConfig, AssetsConfig, ServerConfig};
use server::state::AppState;

pub mod routes {
    pub const DOWNLOAD_ALL_SPECS: &str = "/download-all-specs";
    pub const PRODUCTS: &str = "/api/v1/products";

    pub fn attached_asset(filename: &str) -> String {
        format!("/attached_assets/{filename}")
    }

    pub fn download(filename: &str) -> String {
        format!("/download/{filename}")
    }

    pub fn product(id: &str) -> String {
        format!("/api/v1/products/{id}")
    }

    pub fn datasheet(filename: &str) -> String {
        format!("/api/v1/datasheets/{filename}")
    }
}

/// A running test server backed by a throwaway asset directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    /// The asset directory backing the server, alive for the duration of
    /// the test.
    pub assets_dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Raw response body.
    pub bytes: Vec<u8>,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let bytes = res
            .bytes()
            .await
            .expect("Failed to read response body")
            .to_vec();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Self {
            status,
            headers,
            bytes,
            body,
        }
    }

    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

impl TestApp {
    /// Starts the server on an ephemeral port with the given asset files.
    pub async fn spawn(files: &[(&str, &[u8])]) -> Self {
        let assets_dir = tempfile::tempdir().expect("Failed to create temp asset dir");
        for (name, content) in files {
            std::fs::write(assets_dir.path().join(name), content)
                .expect("Failed to write asset fixture");
        }

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            assets: AssetsConfig {
                dir: assets_dir.path().to_path_buf(),
            },
            archive: ArchiveConfig {
                bundle_name: "Technical_Specifications_Complete.zip".to_string(),
            },
        };

        let state = AppState {
            resolver: Arc::new(
                AssetResolver::new(&config.assets.dir).expect("Failed to open asset dir"),
            ),
            catalog: Arc::new(Catalog::load().expect("Failed to load catalog")),
            datasheets: Arc::new(DatasheetRegistry::load().expect("Failed to load datasheets")),
            config,
        };

        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            assets_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }
}

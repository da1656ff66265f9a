//! Asset delivery core: filename validation, path resolution inside the
//! assets root, and the technical-specification ZIP bundler.

pub mod archive;
pub mod error;
pub mod filename;
pub mod resolver;

pub use archive::{BundleEntry, StreamSink, plan_pdf_bundle, write_bundle};
pub use error::AssetError;
pub use resolver::AssetResolver;

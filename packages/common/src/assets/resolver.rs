use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::AssetError;
use super::filename::validate_asset_filename;

/// Extensions permitted on the validated download route.
const DOWNLOAD_EXTENSIONS: [&str; 2] = ["pdf", "docx"];

/// Resolves client-supplied filenames to paths inside a fixed assets
/// directory, rejecting anything that could escape it.
///
/// The root is canonicalized once at construction; every resolved path is
/// canonicalized again and checked component-wise against the root, so a
/// symlink pointing outside (or a sibling directory such as `assets-evil`
/// next to `assets`) can never be served.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    /// Creates a resolver for `root`. Fails if the directory does not
    /// exist or cannot be canonicalized.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let root = root.into();
        let root = root.canonicalize()?;
        if !root.is_dir() {
            return Err(AssetError::Io(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("assets root is not a directory: {}", root.display()),
            )));
        }
        Ok(Self { root })
    }

    /// The canonicalized assets root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a filename for the validated download route. The lowercase
    /// extension must be `.pdf` or `.docx`; everything else is rejected
    /// with the same generic error as a traversal attempt.
    pub fn resolve_download(&self, filename: &str) -> Result<PathBuf, AssetError> {
        let name = self.checked_name(filename)?;

        let allowed = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .is_some_and(|ext| DOWNLOAD_EXTENSIONS.contains(&ext.as_str()));
        if !allowed {
            debug!(filename, "rejected download: disallowed extension");
            return Err(AssetError::InvalidRequest);
        }

        self.locate(name)
    }

    /// Resolves a filename for the static asset route. Same traversal
    /// guarantees as [`resolve_download`](Self::resolve_download), without
    /// the extension whitelist (the directory also holds site images).
    pub fn resolve_static(&self, filename: &str) -> Result<PathBuf, AssetError> {
        let name = self.checked_name(filename)?;
        self.locate(name)
    }

    fn checked_name<'a>(&self, filename: &'a str) -> Result<&'a str, AssetError> {
        validate_asset_filename(filename).map_err(|e| {
            debug!(filename, reason = e.message(), "rejected asset filename");
            AssetError::InvalidRequest
        })
    }

    /// Joins a pre-validated name to the root and re-verifies containment
    /// after resolving symlinks. The prefix check is component-wise, not a
    /// string comparison.
    fn locate(&self, name: &str) -> Result<PathBuf, AssetError> {
        let joined = self.root.join(name);
        let resolved = match joined.canonicalize() {
            Ok(path) => path,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(AssetError::NotFound),
            Err(e) => return Err(e.into()),
        };

        if !resolved.starts_with(&self.root) {
            debug!(filename = name, "rejected asset: resolved outside root");
            return Err(AssetError::InvalidRequest);
        }

        if !resolved.is_file() {
            return Err(AssetError::NotFound);
        }

        Ok(resolved)
    }
}

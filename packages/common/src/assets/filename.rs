use std::sync::LazyLock;

use regex::Regex;

/// Result of validating an asset filename.
#[derive(Debug)]
pub enum FilenameError {
    /// Filename is empty or whitespace-only.
    Empty,
    /// Filename contains path separators (`/` or `\`).
    ContainsPathSeparator,
    /// Filename contains a parent-directory reference (`..`).
    PathTraversal,
    /// Filename contains null bytes.
    NulByte,
    /// Filename contains control characters (CR, LF, etc.).
    ControlCharacter,
}

impl FilenameError {
    /// Returns a human-readable error message. For logging only; HTTP
    /// responses use a single generic message for every variant.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::PathTraversal => "Invalid filename: '..' is not allowed",
            Self::NulByte => "Invalid filename: null bytes are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
        }
    }
}

/// Validates a bare asset filename (no directory components allowed).
///
/// This is the shared security boundary for every route that accepts a
/// client-supplied filename; it rejects anything that could name a path
/// outside the assets root before the filesystem is ever touched.
pub fn validate_asset_filename(filename: &str) -> Result<&str, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }

    if trimmed.contains('\0') {
        return Err(FilenameError::NulByte);
    }

    // Reject ASCII control characters to prevent
    // HTTP header injection (e.g. CRLF in Content-Disposition).
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }

    if trimmed.contains("..") {
        return Err(FilenameError::PathTraversal);
    }

    Ok(trimmed)
}

/// Matches the upload-timestamp token the asset-ingestion process appends
/// to filenames, e.g. `report_1757000199556.pdf`.
static UPLOAD_TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_\d{13}").expect("upload timestamp pattern"));

/// Strips embedded 13-digit upload timestamps from a filename, yielding
/// the display name used for archive entries:
/// `report_1757000199556.pdf` -> `report.pdf`.
pub fn strip_upload_timestamp(filename: &str) -> String {
    UPLOAD_TIMESTAMP.replace_all(filename, "").into_owned()
}

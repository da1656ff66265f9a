pub mod assets;
pub mod datasheet;
pub mod download;
pub mod product;
pub mod specs;

pub(crate) const PDF_CONTENT_TYPE: &str = "application/pdf";
pub(crate) const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// Asset files carry a content hash or upload timestamp in their name, so
/// they can be cached forever.
pub(crate) const IMMUTABLE_CACHE: &str = "public, max-age=31536000, immutable";

/// Build a safe `Content-Disposition` header value.
pub(crate) fn content_disposition_value(kind: &str, filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "download".to_string()
    } else {
        ascii_safe
    };

    // RFC 5987 percent-encoding for filename*.
    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => String::from(b as char),
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("{kind}; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}

//! Traffic Filter
//!
//! Content-type based skip policy for captured exchanges. Structured-syntax
//! suffixes (RFC 6839 `+json` / `+xml`) always pass; bulk binary formats are
//! dropped before assembly and delivery.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Prefixes that are always skipped.
const SKIP_PREFIXES: [&str; 4] = ["audio/", "video/", "font/", "binary/"];

/// Exact content-types that are skipped.
static SKIP_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "application/octet-stream",
        "application/pdf",
        "application/x-pdf",
        "application/zip",
        "application/x-zip-compressed",
        "application/x-protobuf",
        "application/font-woff",
        "application/font-woff2",
        "application/vnd.ms-fontobject",
    ]
    .into_iter()
    .collect()
});

/// Decide whether a captured exchange should be skipped based on the
/// response content-type. Absent or empty types are always forwarded.
pub fn should_skip(content_type: Option<&str>) -> bool {
    let ct = match content_type {
        Some(value) if !value.is_empty() => value.to_lowercase(),
        _ => return false,
    };

    // Structured syntax suffixes pass regardless of the later rules,
    // e.g. "application/vnd.api+json".
    if ct.contains("+json") || ct.contains("+xml") {
        return false;
    }

    if SKIP_PREFIXES.iter().any(|prefix| ct.starts_with(prefix)) {
        return true;
    }

    // Raster images are filtered; SVG is text/XML and passes.
    if ct.starts_with("image/") && !ct.contains("svg") {
        return true;
    }

    SKIP_TYPES.contains(ct.as_str())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_empty_type_is_forwarded() {
        assert!(!should_skip(None));
        assert!(!should_skip(Some("")));
    }

    #[test]
    fn structured_suffixes_always_pass() {
        assert!(!should_skip(Some("application/vnd.api+json")));
        assert!(!should_skip(Some("image/svg+xml")));
        assert!(!should_skip(Some("application/soap+xml")));
        // the suffix overrides the font/ prefix rule
        assert!(!should_skip(Some("font/collection+xml")));
    }

    #[test]
    fn skip_prefixes_are_skipped() {
        assert!(should_skip(Some("audio/mpeg")));
        assert!(should_skip(Some("video/mp4")));
        assert!(should_skip(Some("font/woff2")));
        assert!(should_skip(Some("binary/stream")));
    }

    #[test]
    fn raster_images_skip_svg_passes() {
        assert!(should_skip(Some("image/png")));
        assert!(should_skip(Some("image/jpeg")));
        assert!(!should_skip(Some("image/svg")));
    }

    #[test]
    fn exact_skip_types_are_skipped() {
        assert!(should_skip(Some("application/octet-stream")));
        assert!(should_skip(Some("application/pdf")));
        assert!(should_skip(Some("application/x-zip-compressed")));
        assert!(should_skip(Some("application/vnd.ms-fontobject")));
    }

    #[test]
    fn comparison_is_case_insensitive() {
        assert!(should_skip(Some("Image/PNG")));
        assert!(should_skip(Some("APPLICATION/PDF")));
        assert!(!should_skip(Some("Application/VND.API+JSON")));
    }

    #[test]
    fn ordinary_text_types_are_forwarded() {
        assert!(!should_skip(Some("application/json")));
        assert!(!should_skip(Some("text/html")));
        assert!(!should_skip(Some("text/plain")));
        assert!(!should_skip(Some("application/javascript")));
    }
}

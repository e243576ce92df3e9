//! Deterministic half of the image upload pipeline.
//!
//! Covers content-type gating and destination-filename computation. The
//! filesystem side (buffering multipart fields, writing under the content
//! root) lives in the api crate.

/// Image content types accepted for upload, with the extension each maps
/// to. Anything not listed here is rejected before any bytes are written.
const FILE_TYPE_MAP: [(&str, &str); 3] = [
    ("image/png", "png"),
    ("image/jpeg", "jpeg"),
    ("image/jpg", "jpg"),
];

/// Resolve a declared content type to its allow-listed file extension.
///
/// Returns `None` for any type outside the allow-list.
pub fn allowed_extension(content_type: &str) -> Option<&'static str> {
    FILE_TYPE_MAP
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
}

/// Compute the destination filename for an uploaded file.
///
/// Whitespace runs in the original name collapse to single hyphens, then a
/// millisecond-resolution timestamp and the allow-listed extension are
/// appended. The timestamp is taken per upload event, so two uploads with
/// the same original name land on distinct files.
///
/// # Examples
///
/// ```
/// use emporia_core::uploads::destination_filename;
///
/// assert_eq!(
///     destination_filename("red shirt.png", "png", 1700000000000),
///     "red-shirt.png-1700000000000.png"
/// );
/// ```
pub fn destination_filename(original_name: &str, extension: &str, stamp_millis: i64) -> String {
    let base = original_name.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{base}-{stamp_millis}.{extension}")
}

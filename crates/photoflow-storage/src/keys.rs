//! Storage key generation
//!
//! Centralized so the upload gateway and the pipeline agree on the key
//! layout. Upload keys embed a timestamp and a short random suffix to
//! stay unique under concurrent uploads; derivative keys are
//! deterministic so reprocessing overwrites in place.

use chrono::Utc;
use uuid::Uuid;

/// Generate a unique upload key under `prefix` and the short opaque id
/// returned to the client. The id is the random suffix, not the key:
/// the key itself stays an internal detail.
pub fn upload_key(prefix: &str, extension: &str) -> (String, String) {
    let timestamp = Utc::now().format("%Y%m%d-%H%M%S");
    let upload_id = Uuid::new_v4().simple().to_string()[..8].to_string();
    let key = format!("{}{}-{}.{}", prefix, timestamp, upload_id, extension);
    (key, upload_id)
}

/// Derivative key for a source object: `{prefix}{stem}_{label}.jpg`.
///
/// The stem is the source basename without its extension. Derivatives
/// are always JPEG regardless of the source format.
pub fn derivative_key(prefix: &str, source_key: &str, label: &str) -> String {
    let basename = source_key.rsplit('/').next().unwrap_or(source_key);
    let stem = basename
        .rsplit_once('.')
        .map(|(stem, _ext)| stem)
        .unwrap_or(basename);
    format!("{}{}_{}.jpg", prefix, stem, label)
}

/// Lowercased file extension of a key or filename, if it has one.
pub fn extension(key: &str) -> Option<String> {
    let basename = key.rsplit('/').next().unwrap_or(key);
    basename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Content type derived from a file extension.
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

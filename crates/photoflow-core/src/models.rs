//! Domain models shared across the Photoflow crates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata key for the uploader's email address.
pub const META_USER_EMAIL: &str = "user-email";
/// Metadata key for the filename the client supplied at upload time.
pub const META_ORIGINAL_FILENAME: &str = "original-filename";
/// Metadata key for the upload timestamp (`YYYYmmdd-HHMMSS`, UTC).
pub const META_UPLOAD_TIMESTAMP: &str = "upload-timestamp";

/// Authorization state of an email against the access list.
///
/// Backed by the pub/sub topic's subscription list: a subscription whose
/// identifier is still the pending-confirmation sentinel is `Pending`,
/// any other subscription for that address is `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    NotSubscribed,
    Pending,
    Confirmed,
}

impl AccessState {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, AccessState::Confirmed)
    }
}

/// One of the three fixed derivative size profiles.
///
/// Each profile is a bounding box: derivatives are resized to fit within
/// it preserving aspect ratio, never upscaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeProfile {
    Thumbnail,
    Medium,
    Large,
}

impl SizeProfile {
    /// All profiles, in the order derivatives are produced and listed
    /// in notifications.
    pub const ALL: [SizeProfile; 3] = [
        SizeProfile::Thumbnail,
        SizeProfile::Medium,
        SizeProfile::Large,
    ];

    /// Bounding box edge in pixels (square bounds).
    pub fn bound(&self) -> u32 {
        match self {
            SizeProfile::Thumbnail => 150,
            SizeProfile::Medium => 500,
            SizeProfile::Large => 1200,
        }
    }

    /// Label used in derivative keys and notification text.
    pub fn label(&self) -> &'static str {
        match self {
            SizeProfile::Thumbnail => "thumbnail",
            SizeProfile::Medium => "medium",
            SizeProfile::Large => "large",
        }
    }
}

impl std::fmt::Display for SizeProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Descriptive metadata attached to an uploaded object at write time.
///
/// The upload gateway writes it; the pipeline reads it back. Keys are
/// propagated verbatim, never invented downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub user_email: Option<String>,
    pub original_filename: Option<String>,
    pub upload_timestamp: Option<String>,
}

impl ObjectMetadata {
    pub fn new(user_email: &str, original_filename: &str, upload_timestamp: &str) -> Self {
        Self {
            user_email: Some(user_email.to_string()),
            original_filename: Some(original_filename.to_string()),
            upload_timestamp: Some(upload_timestamp.to_string()),
        }
    }

    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self {
            user_email: map.get(META_USER_EMAIL).cloned(),
            original_filename: map.get(META_ORIGINAL_FILENAME).cloned(),
            upload_timestamp: map.get(META_UPLOAD_TIMESTAMP).cloned(),
        }
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        if let Some(ref email) = self.user_email {
            map.insert(META_USER_EMAIL.to_string(), email.clone());
        }
        if let Some(ref filename) = self.original_filename {
            map.insert(META_ORIGINAL_FILENAME.to_string(), filename.clone());
        }
        if let Some(ref ts) = self.upload_timestamp {
            map.insert(META_UPLOAD_TIMESTAMP.to_string(), ts.clone());
        }
        map
    }

    /// Filename to display in notifications, falling back to the
    /// original's generic placeholder.
    pub fn display_filename(&self) -> &str {
        self.original_filename.as_deref().unwrap_or("image")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_profile_bounds() {
        assert_eq!(SizeProfile::Thumbnail.bound(), 150);
        assert_eq!(SizeProfile::Medium.bound(), 500);
        assert_eq!(SizeProfile::Large.bound(), 1200);
    }

    #[test]
    fn test_metadata_round_trip() {
        let meta = ObjectMetadata::new("user@example.com", "photo.png", "20260101-120000");
        let map = meta.to_map();
        assert_eq!(map.len(), 3);
        assert_eq!(
            map.get(META_USER_EMAIL).map(String::as_str),
            Some("user@example.com")
        );

        let parsed = ObjectMetadata::from_map(&map);
        assert_eq!(parsed, meta);
    }

    #[test]
    fn test_metadata_missing_fields() {
        let meta = ObjectMetadata::from_map(&HashMap::new());
        assert!(meta.user_email.is_none());
        assert_eq!(meta.display_filename(), "image");
    }
}

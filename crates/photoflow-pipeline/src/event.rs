//! Storage-write event records.
//!
//! The storage layer delivers one notification per object write, in the
//! S3 notification shape: a `Records` array whose entries carry the
//! bucket name and the URL-escaped object key.

use percent_encoding::percent_decode_str;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketEntity,
    pub object: ObjectEntity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketEntity {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEntity {
    pub key: String,
}

impl StorageEvent {
    pub fn first_record(&self) -> Option<&EventRecord> {
        self.records.first()
    }
}

/// Unescape a URL-escaped object key: '+' encodes a space, the rest is
/// percent-encoding. Must run before the key is used against storage.
pub fn unescape_key(raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .into_owned()
}

//! Photoflow storage library
//!
//! Capability interface over the collaborator object store, with an S3
//! implementation (any S3-compatible endpoint) and an in-memory backend
//! for tests and local development.
//!
//! # Storage key layout
//!
//! - **Uploads**: `{upload_prefix}{YYYYmmdd-HHMMSS}-{8 hex}.{ext}`
//! - **Derivatives**: `{derivative_prefix}{stem}_{size_label}.jpg`
//!
//! Upload and derivative prefixes must never overlap; derivative keys are
//! deterministic functions of the source basename and size label so
//! reprocessing an upload overwrites its derivatives idempotently.

pub mod keys;
pub mod memory;
pub mod s3;
pub mod traits;

pub use memory::MemoryStorage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};

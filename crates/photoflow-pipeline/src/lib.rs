//! Photoflow pipeline library
//!
//! The event-triggered half of the system: parses storage-write
//! notifications, produces the three resized JPEG derivatives for each
//! uploaded image, stores them with 7-day presigned download links, and
//! notifies the uploader. Stateless per invocation; reprocessing a key
//! idempotently overwrites its derivatives.

pub mod event;
pub mod notify;
pub mod processor;

pub use event::{unescape_key, StorageEvent};
pub use notify::Notifier;
pub use processor::{DerivativeRecord, ImagePipeline, PipelineOutcome, PipelineResult};

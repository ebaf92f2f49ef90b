//! Photoflow core library
//!
//! Shared foundation for the Photoflow services: configuration loaded from
//! the environment, the unified error taxonomy, and the domain models
//! (size profiles, object metadata, access states) used across crates.

pub mod config;
pub mod error;
pub mod models;

pub use config::{Config, PubSubBackend, StorageBackend};
pub use error::{AppError, LogLevel};
pub use models::{AccessState, ObjectMetadata, SizeProfile};

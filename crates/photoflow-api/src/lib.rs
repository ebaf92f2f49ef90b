//! Photoflow API
//!
//! The interactive half of the system: the upload gateway, the
//! self-service access request endpoint, and the webhook that feeds
//! storage-write events into the image pipeline.

pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;

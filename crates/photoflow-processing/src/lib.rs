//! Photoflow processing library
//!
//! Image transformation primitives for the derivative pipeline: decode,
//! alpha/palette flattening onto an opaque white background, fit-within
//! resizing, and JPEG encoding. All operations are pure functions over
//! in-memory buffers; storage and notification concerns live elsewhere.

pub mod derivative;
pub mod flatten;
pub mod resize;

pub use derivative::{decode, prepare_source, render_derivative, DerivativeImage, ProcessingError};
pub use flatten::flatten_onto_white;
pub use resize::fit_within;

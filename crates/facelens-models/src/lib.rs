//! Shared data models for FaceLens.
//!
//! This crate provides Serde-serializable types for:
//! - Pixel arrays decoded from command image payloads
//! - Face locations (detector convention) and bounding boxes (host convention)
//! - Opaque face encodings produced by the recognition service
//! - Model variants selected by the startup capability probe

pub mod encoding;
pub mod pixels;
pub mod rect;
pub mod variant;

// Re-export common types
pub use encoding::{FaceEncoding, ENCODING_LEN};
pub use pixels::{PixelArray, PixelArrayError};
pub use rect::{BoundingBox, FaceLocation};
pub use variant::{ModelVariant, ModelVariantParseError};

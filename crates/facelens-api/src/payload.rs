//! Command image payload decoding.
//!
//! Image arguments arrive as base64 strings (optionally wrapped in a
//! `data:` URI, which is how browser clients send them). Decoding goes
//! base64 -> image bytes -> RGB pixel array; any failure along the way
//! is an invalid-image error, surfaced as HTTP 422.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use facelens_models::PixelArray;

use crate::error::{ApiError, ApiResult};

/// Decode a base64 image payload into a pixel array.
pub fn decode_image(payload: &str) -> ApiResult<PixelArray> {
    // Strip a data-URI prefix ("data:image/png;base64,....") if present.
    let encoded = match payload.split_once(";base64,") {
        Some((_, rest)) => rest,
        None => payload,
    };

    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| ApiError::invalid_image(format!("Invalid base64 payload: {}", e)))?;

    let image = image::load_from_memory(&bytes)
        .map_err(|e| ApiError::invalid_image(format!("Undecodable image: {}", e)))?;

    Ok(PixelArray::from(image.to_rgb8()))
}

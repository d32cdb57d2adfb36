//! Decoded image pixel data.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of channels per pixel (RGB).
const CHANNELS: usize = 3;

#[derive(Debug, Error)]
pub enum PixelArrayError {
    #[error("Pixel buffer length mismatch: expected {expected} bytes for {width}x{height}, got {actual}")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// A decoded RGB image as a height x width x 3 byte array.
///
/// Immutable for the duration of a request. Equality is element-wise over
/// the raw pixel data, which is what keys the label-encoding cache: two
/// arrays are the same label if and only if every byte matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelArray {
    width: u32,
    height: u32,
    /// Row-major RGB bytes, base64 on the wire.
    #[serde(with = "base64_bytes")]
    data: Vec<u8>,
}

impl PixelArray {
    /// Create a pixel array from raw row-major RGB bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PixelArrayError> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(PixelArrayError::LengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major RGB bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl From<RgbImage> for PixelArray {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }
}

/// Base64 (de)serialization for the raw pixel buffer. Raw bytes as a JSON
/// number array would be an order of magnitude larger on the wire.
mod base64_bytes {
    use super::{Engine, BASE64};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64.decode(encoded).map_err(serde::de::Error::custom)
    }
}

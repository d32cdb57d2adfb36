//! Detection model variant definitions.
//!
//! The recognition service ships two face detectors:
//!
//! - `Hog`: histogram-of-oriented-gradients detector (CPU, default)
//! - `Cnn`: convolutional detector (more accurate, needs CUDA)
//!
//! The variant is selected once at startup by the capability probe and
//! threaded into every detection call.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Face detection model variant.
///
/// Higher variants provide better accuracy but require accelerated
/// hardware on the recognition service side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    /// HOG-based detector. Runs on any hardware.
    #[default]
    Hog,

    /// CNN-based detector. Slower without CUDA, more accurate with it.
    Cnn,
}

impl ModelVariant {
    /// All available model variants.
    pub const ALL: &'static [ModelVariant] = &[ModelVariant::Hog, ModelVariant::Cnn];

    /// Returns the variant name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelVariant::Hog => "hog",
            ModelVariant::Cnn => "cnn",
        }
    }

    /// Returns a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            ModelVariant::Hog => "HOG detector (CPU, default)",
            ModelVariant::Cnn => "CNN detector (CUDA-accelerated)",
        }
    }

    /// Returns true if this variant requires accelerated hardware.
    pub fn requires_cuda(&self) -> bool {
        matches!(self, ModelVariant::Cnn)
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModelVariant {
    type Err = ModelVariantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hog" => Ok(ModelVariant::Hog),
            "cnn" => Ok(ModelVariant::Cnn),
            _ => Err(ModelVariantParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown model variant: {0}")]
pub struct ModelVariantParseError(String);

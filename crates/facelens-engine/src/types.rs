//! Recognition service request/response types.

use facelens_models::{FaceEncoding, FaceLocation, ModelVariant, PixelArray};
use serde::{Deserialize, Serialize};

/// Request to locate faces in an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocateRequest {
    /// Image pixels to scan
    pub pixels: PixelArray,
    /// Detection model variant to run
    pub model: ModelVariant,
}

/// Response from face location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocateResponse {
    /// Detected face rectangles, detector order
    pub locations: Vec<FaceLocation>,
}

/// Request to compute face encodings for an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeRequest {
    /// Image pixels to encode
    pub pixels: PixelArray,
    /// Pre-detected face rectangles; the service auto-detects when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_locations: Option<Vec<FaceLocation>>,
}

/// Response from face encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeResponse {
    /// One embedding per detected face, detector order
    pub encodings: Vec<FaceEncoding>,
}

/// Request to compare candidate encodings against a reference encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    /// Candidate embeddings
    pub candidates: Vec<FaceEncoding>,
    /// Reference embedding to match against
    pub reference: FaceEncoding,
    /// Maximum embedding distance accepted as a match
    pub tolerance: f64,
}

/// Response from encoding comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    /// One match flag per candidate, candidate order
    pub matches: Vec<bool>,
}

/// Hardware capabilities reported by the recognition service.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// True if the service has CUDA devices and was built with CUDA support
    pub cuda: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: Option<String>,
}

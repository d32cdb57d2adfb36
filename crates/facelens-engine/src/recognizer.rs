//! The recognizer seam.

use async_trait::async_trait;
use facelens_models::{FaceEncoding, FaceLocation, ModelVariant, PixelArray};

use crate::error::EngineResult;
use crate::types::Capabilities;

/// Face recognition operations the rest of the system programs against.
///
/// The production implementation is [`crate::RecognizerClient`]; tests
/// substitute in-memory fakes. All methods map one-to-one onto the
/// external recognition service's endpoints.
#[async_trait]
pub trait FaceRecognizer: Send + Sync {
    /// Detect face rectangles in an image, in detector output order.
    async fn locate_faces(
        &self,
        pixels: &PixelArray,
        variant: ModelVariant,
    ) -> EngineResult<Vec<FaceLocation>>;

    /// Compute one embedding per face.
    ///
    /// When `known_locations` is `None` the service runs its own
    /// detection pass over the whole image.
    async fn encode_faces(
        &self,
        pixels: &PixelArray,
        known_locations: Option<&[FaceLocation]>,
    ) -> EngineResult<Vec<FaceEncoding>>;

    /// Compare candidate embeddings against a reference embedding.
    ///
    /// Returns one boolean per candidate, in candidate order: true when
    /// the embedding distance is within `tolerance`.
    async fn compare_faces(
        &self,
        candidates: &[FaceEncoding],
        reference: &FaceEncoding,
        tolerance: f64,
    ) -> EngineResult<Vec<bool>>;

    /// Query the service's hardware capabilities.
    async fn capabilities(&self) -> EngineResult<Capabilities>;
}

//! Opaque face encodings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Length of the embedding vector produced by the recognition service.
pub const ENCODING_LEN: usize = 128;

/// A face embedding vector produced by the recognition service.
///
/// Treated as an unstructured value: only identity/equality and the
/// service-side comparison matter. The fixed length is the service's
/// contract, not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FaceEncoding(Vec<f64>);

impl FaceEncoding {
    /// Wrap a raw embedding vector.
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// The raw embedding values.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of dimensions in the embedding.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the embedding has no dimensions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for FaceEncoding {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

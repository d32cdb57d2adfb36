//! Label encoding cache.
//!
//! Identifying a face means re-encoding the reference ("label") image on
//! every request, and clients overwhelmingly send the same label image
//! call after call. This cache holds the encodings of the most recent
//! label image in a single slot keyed by exact pixel equality, so a
//! repeated label costs one array comparison instead of a detection pass.
//!
//! Recomputing is always safe; the cache is purely a performance
//! optimization.

use facelens_models::{FaceEncoding, PixelArray};
use tokio::sync::Mutex;
use tracing::debug;

/// Single-slot cache of the most recent label image's encodings.
///
/// The slot is guarded by an async mutex held across the whole
/// check-then-set sequence, so concurrent requests with different label
/// images cannot interleave and observe a half-updated slot.
#[derive(Default)]
pub struct LabelCache {
    slot: Mutex<Option<(PixelArray, Vec<FaceEncoding>)>>,
}

impl LabelCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached encodings for `label`, or compute and cache them.
    ///
    /// A hit requires element-wise equality with the stored array. On a
    /// miss the slot is replaced wholesale; there is no other eviction.
    /// At most one computation runs per distinct label array value, and
    /// `compute_fn` is never invoked on a hit.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        label: &PixelArray,
        compute_fn: F,
    ) -> Result<Vec<FaceEncoding>, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Vec<FaceEncoding>, E>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some((cached_label, cached_encodings)) = slot.as_ref() {
            if cached_label == label {
                debug!(encodings = cached_encodings.len(), "Label cache HIT");
                return Ok(cached_encodings.clone());
            }
        }

        debug!("Label cache MISS, encoding label image");
        let encodings = compute_fn().await?;
        *slot = Some((label.clone(), encodings.clone()));
        Ok(encodings)
    }
}

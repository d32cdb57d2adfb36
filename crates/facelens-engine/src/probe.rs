//! Startup capability probe.

use facelens_models::ModelVariant;
use tracing::{debug, info};

use crate::recognizer::FaceRecognizer;

/// Select the detection model variant for this process.
///
/// Queries the recognition service's capabilities once at startup: CUDA
/// present selects the CNN detector, otherwise the HOG default. A probe
/// error also selects the default; running without acceleration is a
/// normal, silent case and there is no retry.
pub async fn select_model_variant(recognizer: &dyn FaceRecognizer) -> ModelVariant {
    match recognizer.capabilities().await {
        Ok(capabilities) if capabilities.cuda => {
            info!("CUDA detected, using CNN detection model");
            ModelVariant::Cnn
        }
        Ok(_) => ModelVariant::Hog,
        Err(e) => {
            debug!("Capability probe failed, using default model: {}", e);
            ModelVariant::Hog
        }
    }
}

//! Application state.

use std::sync::Arc;

use anyhow::Result;
use facelens_engine::{select_model_variant, FaceRecognizer, RecognizerClient};
use facelens_models::ModelVariant;
use tracing::info;

use crate::cache::LabelCache;
use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub recognizer: Arc<dyn FaceRecognizer>,
    /// Detection model variant selected once by the startup probe.
    pub variant: ModelVariant,
    pub label_cache: Arc<LabelCache>,
}

impl AppState {
    /// Create new application state.
    ///
    /// Connects the recognizer client and runs the capability probe once;
    /// the selected variant is immutable for the process lifetime.
    pub async fn new(config: ApiConfig) -> Result<Self> {
        let recognizer = Arc::new(RecognizerClient::from_env()?);
        let variant = select_model_variant(recognizer.as_ref()).await;

        info!(variant = %variant, "Detection model variant selected");

        Ok(Self {
            config,
            recognizer,
            variant,
            label_cache: Arc::new(LabelCache::new()),
        })
    }

    /// Create state around an existing recognizer, skipping the probe.
    ///
    /// Used by tests to substitute a fake recognizer.
    pub fn with_recognizer(
        config: ApiConfig,
        recognizer: Arc<dyn FaceRecognizer>,
        variant: ModelVariant,
    ) -> Self {
        Self {
            config,
            recognizer,
            variant,
            label_cache: Arc::new(LabelCache::new()),
        }
    }
}

//! Recognition service HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use facelens_models::{FaceEncoding, FaceLocation, ModelVariant, PixelArray};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::recognizer::FaceRecognizer;
use crate::types::{
    Capabilities, CompareRequest, CompareResponse, EncodeRequest, EncodeResponse, HealthResponse,
    LocateRequest, LocateResponse,
};

/// Configuration for the recognizer client.
#[derive(Debug, Clone)]
pub struct RecognizerClientConfig {
    /// Base URL of the recognition service
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Max retries
    pub max_retries: u32,
}

impl Default for RecognizerClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8100".to_string(),
            timeout: Duration::from_secs(60), // CNN detection on large images is slow
            max_retries: 2,
        }
    }
}

impl RecognizerClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("FACE_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8100".to_string()),
            timeout: Duration::from_secs(
                std::env::var("FACE_SERVICE_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            max_retries: std::env::var("FACE_SERVICE_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        }
    }
}

/// Client for the face recognition service.
pub struct RecognizerClient {
    http: Client,
    config: RecognizerClientConfig,
}

impl RecognizerClient {
    /// Create a new recognizer client.
    pub fn new(config: RecognizerClientConfig) -> EngineResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(EngineError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> EngineResult<Self> {
        Self::new(RecognizerClientConfig::from_env())
    }

    /// Check if the recognition service is healthy.
    pub async fn health_check(&self) -> EngineResult<bool> {
        let url = format!("{}/health", self.config.base_url);

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                let health: HealthResponse = response.json().await?;
                Ok(health.status == "healthy" || health.status == "ok")
            }
            Ok(response) => {
                warn!("Recognition service health check failed: {}", response.status());
                Ok(false)
            }
            Err(e) => {
                warn!("Recognition service health check error: {}", e);
                Ok(false)
            }
        }
    }

    /// POST a JSON request to a service endpoint and decode the response.
    async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> EngineResult<Resp> {
        let url = format!("{}{}", self.config.base_url, path);

        debug!("Sending recognition request to {}", url);

        let response = self
            .with_retry(|| async {
                let response = self
                    .http
                    .post(&url)
                    .json(request)
                    .send()
                    .await
                    .map_err(EngineError::Network)?;

                if response.status().is_server_error() {
                    return Err(EngineError::ServiceUnavailable(format!(
                        "Recognition service returned {}",
                        response.status()
                    )));
                }
                Ok(response)
            })
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::RequestFailed(format!(
                "Recognition service returned {}: {}",
                status, body
            )));
        }

        let decoded: Resp = response.json().await?;
        Ok(decoded)
    }

    /// Execute with retry logic.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> EngineResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = EngineResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    warn!(
                        "Recognition request failed (attempt {}), retrying in {:?}: {}",
                        attempt + 1,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(EngineError::RequestFailed("Unknown error".to_string())))
    }
}

#[async_trait]
impl FaceRecognizer for RecognizerClient {
    async fn locate_faces(
        &self,
        pixels: &PixelArray,
        variant: ModelVariant,
    ) -> EngineResult<Vec<FaceLocation>> {
        let request = LocateRequest {
            pixels: pixels.clone(),
            model: variant,
        };
        let response: LocateResponse = self.post("/locate", &request).await?;
        Ok(response.locations)
    }

    async fn encode_faces(
        &self,
        pixels: &PixelArray,
        known_locations: Option<&[FaceLocation]>,
    ) -> EngineResult<Vec<FaceEncoding>> {
        let request = EncodeRequest {
            pixels: pixels.clone(),
            known_locations: known_locations.map(<[FaceLocation]>::to_vec),
        };
        let response: EncodeResponse = self.post("/encode", &request).await?;
        Ok(response.encodings)
    }

    async fn compare_faces(
        &self,
        candidates: &[FaceEncoding],
        reference: &FaceEncoding,
        tolerance: f64,
    ) -> EngineResult<Vec<bool>> {
        let request = CompareRequest {
            candidates: candidates.to_vec(),
            reference: reference.clone(),
            tolerance,
        };
        let response: CompareResponse = self.post("/compare", &request).await?;

        if response.matches.len() != candidates.len() {
            return Err(EngineError::InvalidResponse(format!(
                "Expected {} match flags, got {}",
                candidates.len(),
                response.matches.len()
            )));
        }
        Ok(response.matches)
    }

    async fn capabilities(&self) -> EngineResult<Capabilities> {
        let url = format!("{}/capabilities", self.config.base_url);
        let response = self.http.get(&url).send().await.map_err(EngineError::Network)?;

        if !response.status().is_success() {
            return Err(EngineError::RequestFailed(format!(
                "Recognition service returned {}",
                response.status()
            )));
        }

        let capabilities: Capabilities = response.json().await?;
        Ok(capabilities)
    }
}

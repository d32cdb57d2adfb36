//! Client for the face recognition service.
//!
//! All detection, embedding extraction, and embedding comparison is
//! delegated to an external recognition service (dlib-backed) exposed
//! over HTTP. This crate provides the typed client for that service,
//! the [`FaceRecognizer`] trait the rest of the system programs
//! against, and the one-shot startup probe that picks the detection
//! model variant based on the service's reported hardware.

pub mod client;
pub mod error;
pub mod probe;
pub mod recognizer;
pub mod types;

pub use client::{RecognizerClient, RecognizerClientConfig};
pub use error::{EngineError, EngineResult};
pub use probe::select_model_variant;
pub use recognizer::FaceRecognizer;
pub use types::Capabilities;

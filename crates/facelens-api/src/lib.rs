//! Axum HTTP API exposing the face commands.
//!
//! Two request/response commands are served: `detect_faces` (face
//! bounding boxes) and `identify_face` (faces matching a reference
//! label image). All recognition work is delegated to the external
//! recognition service through `facelens-engine`; this crate owns the
//! command surface, the label-encoding cache, and the service state.

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod payload;
pub mod routes;
pub mod state;

pub use cache::LabelCache;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;

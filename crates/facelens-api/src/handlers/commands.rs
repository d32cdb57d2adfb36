//! Face command handlers.
//!
//! The two commands are synchronous request/response calls:
//!
//! 1. `detect_faces`: one image in, normalized bounding boxes out
//! 2. `identify_face`: input image + label image + tolerance in,
//!    bounding boxes of the input faces matching the label identity out
//!
//! Zero detected faces is a normal case and produces an empty result
//! list; only undecodable payloads and recognition service failures are
//! errors.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use facelens_models::BoundingBox;

use crate::error::{ApiError, ApiResult};
use crate::payload::decode_image;
use crate::state::AppState;

/// Default match tolerance when the caller omits it.
const DEFAULT_MATCH_TOLERANCE: f64 = 0.6;

/// Ordered bounding-box results of either command.
#[derive(Debug, Serialize)]
pub struct CommandResults {
    pub results: Vec<BoundingBox>,
}

// ============================================================================
// detect_faces
// ============================================================================

/// Request for the `detect_faces` command.
#[derive(Debug, Deserialize)]
pub struct DetectFacesRequest {
    /// Base64 image payload
    pub image: String,
}

/// Detect faces in an image.
///
/// Returns one normalized bounding box per detected face, in detector
/// output order.
pub async fn detect_faces(
    State(state): State<AppState>,
    Json(request): Json<DetectFacesRequest>,
) -> ApiResult<Json<CommandResults>> {
    let pixels = decode_image(&request.image)?;

    let locations = state.recognizer.locate_faces(&pixels, state.variant).await?;

    let results: Vec<BoundingBox> = locations
        .iter()
        .map(|location| BoundingBox::from_location(location, pixels.width(), pixels.height()))
        .collect();

    info!(faces = results.len(), variant = %state.variant, "detect_faces completed");

    Ok(Json(CommandResults { results }))
}

// ============================================================================
// identify_face
// ============================================================================

/// Request for the `identify_face` command.
#[derive(Debug, Deserialize, Validate)]
pub struct IdentifyFaceRequest {
    /// Base64 image payload to search for matching faces
    pub input_image: String,
    /// Base64 reference image; its first detected face is the identity
    pub label_image: String,
    /// Maximum embedding distance accepted as a match
    #[serde(default = "default_match_tolerance")]
    #[validate(range(min = 0.1, max = 1.0))]
    pub match_tolerance: f64,
}

fn default_match_tolerance() -> f64 {
    DEFAULT_MATCH_TOLERANCE
}

/// Identify input-image faces matching the label image's identity.
///
/// The label image supports a single reference identity: every input
/// face is compared against the label image's first encoding only.
/// Results preserve the input faces' detector order, filtered to
/// matches.
pub async fn identify_face(
    State(state): State<AppState>,
    Json(request): Json<IdentifyFaceRequest>,
) -> ApiResult<Json<CommandResults>> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let input_pixels = decode_image(&request.input_image)?;
    let label_pixels = decode_image(&request.label_image)?;

    // The input side is always recomputed; only the label side is cached.
    let input_locations = state
        .recognizer
        .locate_faces(&input_pixels, state.variant)
        .await?;
    let input_encodings = state
        .recognizer
        .encode_faces(&input_pixels, Some(&input_locations))
        .await?;

    let label_encodings = state
        .label_cache
        .get_or_compute(&label_pixels, || async {
            // Whole-image encode: the service runs its own detection pass.
            state.recognizer.encode_faces(&label_pixels, None).await
        })
        .await?;

    // No face on either side means no matches, not an error.
    let Some(reference) = label_encodings.first() else {
        info!("identify_face: no face in label image");
        return Ok(Json(CommandResults { results: vec![] }));
    };
    if input_encodings.is_empty() {
        info!("identify_face: no faces in input image");
        return Ok(Json(CommandResults { results: vec![] }));
    }

    let matches = state
        .recognizer
        .compare_faces(&input_encodings, reference, request.match_tolerance)
        .await?;

    let results: Vec<BoundingBox> = input_locations
        .iter()
        .zip(matches.iter())
        .filter(|(_, matched)| **matched)
        .map(|(location, _)| {
            BoundingBox::from_location(location, input_pixels.width(), input_pixels.height())
        })
        .collect();

    info!(
        input_faces = input_locations.len(),
        matched = results.len(),
        tolerance = request.match_tolerance,
        "identify_face completed"
    );

    Ok(Json(CommandResults { results }))
}

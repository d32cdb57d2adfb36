//! Router-level tests for the face commands, using a scripted recognizer.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{json, Value};
use tower::ServiceExt;

use facelens_api::{create_router, ApiConfig, AppState};
use facelens_engine::{Capabilities, EngineResult, FaceRecognizer};
use facelens_models::{FaceEncoding, FaceLocation, ModelVariant, PixelArray};

/// Recognizer double that replays fixed responses and records calls.
#[derive(Default)]
struct ScriptedRecognizer {
    locations: Vec<FaceLocation>,
    input_encodings: Vec<FaceEncoding>,
    label_encodings: Vec<FaceEncoding>,
    matches: Vec<bool>,
    label_encode_calls: AtomicUsize,
    last_tolerance: Mutex<Option<f64>>,
}

#[async_trait]
impl FaceRecognizer for ScriptedRecognizer {
    async fn locate_faces(
        &self,
        _pixels: &PixelArray,
        _variant: ModelVariant,
    ) -> EngineResult<Vec<FaceLocation>> {
        Ok(self.locations.clone())
    }

    async fn encode_faces(
        &self,
        _pixels: &PixelArray,
        known_locations: Option<&[FaceLocation]>,
    ) -> EngineResult<Vec<FaceEncoding>> {
        if known_locations.is_some() {
            Ok(self.input_encodings.clone())
        } else {
            self.label_encode_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.label_encodings.clone())
        }
    }

    async fn compare_faces(
        &self,
        _candidates: &[FaceEncoding],
        _reference: &FaceEncoding,
        tolerance: f64,
    ) -> EngineResult<Vec<bool>> {
        *self.last_tolerance.lock().unwrap() = Some(tolerance);
        Ok(self.matches.clone())
    }

    async fn capabilities(&self) -> EngineResult<Capabilities> {
        Ok(Capabilities { cuda: false })
    }
}

fn router_for(recognizer: Arc<ScriptedRecognizer>) -> Router {
    let state = AppState::with_recognizer(ApiConfig::default(), recognizer, ModelVariant::Hog);
    create_router(state)
}

fn png_base64(width: u32, height: u32, rgb: [u8; 3]) -> String {
    let image = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    BASE64.encode(bytes)
}

fn encoding(seed: f64) -> FaceEncoding {
    FaceEncoding::new(vec![seed; 8])
}

async fn post_json(router: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn detect_faces_returns_normalized_boxes() {
    let recognizer = Arc::new(ScriptedRecognizer {
        locations: vec![
            FaceLocation::new(10, 100, 60, 50),
            FaceLocation::new(70, 160, 120, 110),
        ],
        ..Default::default()
    });
    let router = router_for(recognizer);

    let (status, body) = post_json(
        &router,
        "/commands/detect_faces",
        json!({ "image": png_base64(200, 200, [128, 128, 128]) }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["results"],
        json!([
            { "left": 0.25, "top": 0.05, "width": 0.25, "height": 0.25 },
            { "left": 0.55, "top": 0.35, "width": 0.25, "height": 0.25 },
        ])
    );
}

#[tokio::test]
async fn detect_faces_zero_faces_is_empty_not_error() {
    let router = router_for(Arc::new(ScriptedRecognizer::default()));

    let (status, body) = post_json(
        &router,
        "/commands/detect_faces",
        json!({ "image": png_base64(64, 64, [0, 0, 0]) }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn detect_faces_rejects_bad_payload() {
    let router = router_for(Arc::new(ScriptedRecognizer::default()));

    let (status, body) = post_json(
        &router,
        "/commands/detect_faces",
        json!({ "image": "definitely-not-base64!!" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("Invalid image"));
}

#[tokio::test]
async fn identify_face_filters_matches_in_input_order() {
    let recognizer = Arc::new(ScriptedRecognizer {
        locations: vec![
            FaceLocation::new(10, 100, 60, 50),
            FaceLocation::new(70, 160, 120, 110),
        ],
        input_encodings: vec![encoding(0.1), encoding(0.2)],
        label_encodings: vec![encoding(0.1)],
        matches: vec![true, false],
        ..Default::default()
    });
    let router = router_for(recognizer);

    let (status, body) = post_json(
        &router,
        "/commands/identify_face",
        json!({
            "input_image": png_base64(200, 200, [50, 60, 70]),
            "label_image": png_base64(100, 100, [200, 0, 0]),
            "match_tolerance": 0.6,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // Only the first face matched; its box survives in input order.
    assert_eq!(
        body["results"],
        json!([{ "left": 0.25, "top": 0.05, "width": 0.25, "height": 0.25 }])
    );
}

#[tokio::test]
async fn identify_face_empty_label_image_yields_empty_results() {
    let recognizer = Arc::new(ScriptedRecognizer {
        locations: vec![FaceLocation::new(10, 100, 60, 50)],
        input_encodings: vec![encoding(0.1)],
        label_encodings: vec![],
        matches: vec![true],
        ..Default::default()
    });
    let router = router_for(recognizer);

    let (status, body) = post_json(
        &router,
        "/commands/identify_face",
        json!({
            "input_image": png_base64(64, 64, [1, 1, 1]),
            "label_image": png_base64(64, 64, [2, 2, 2]),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn identify_face_empty_input_image_yields_empty_results() {
    let recognizer = Arc::new(ScriptedRecognizer {
        locations: vec![],
        input_encodings: vec![],
        label_encodings: vec![encoding(0.5)],
        matches: vec![],
        ..Default::default()
    });
    let router = router_for(recognizer);

    let (status, body) = post_json(
        &router,
        "/commands/identify_face",
        json!({
            "input_image": png_base64(64, 64, [1, 1, 1]),
            "label_image": png_base64(64, 64, [2, 2, 2]),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn identify_face_rejects_out_of_range_tolerance() {
    let router = router_for(Arc::new(ScriptedRecognizer::default()));

    let (status, body) = post_json(
        &router,
        "/commands/identify_face",
        json!({
            "input_image": png_base64(64, 64, [1, 1, 1]),
            "label_image": png_base64(64, 64, [2, 2, 2]),
            "match_tolerance": 1.5,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("Validation"));
}

#[tokio::test]
async fn identify_face_defaults_tolerance() {
    let recognizer = Arc::new(ScriptedRecognizer {
        locations: vec![FaceLocation::new(0, 10, 10, 0)],
        input_encodings: vec![encoding(0.1)],
        label_encodings: vec![encoding(0.1)],
        matches: vec![true],
        ..Default::default()
    });
    let router = router_for(Arc::clone(&recognizer));

    let (status, _) = post_json(
        &router,
        "/commands/identify_face",
        json!({
            "input_image": png_base64(64, 64, [1, 1, 1]),
            "label_image": png_base64(64, 64, [2, 2, 2]),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(*recognizer.last_tolerance.lock().unwrap(), Some(0.6));
}

#[tokio::test]
async fn identify_face_caches_label_encodings() {
    let recognizer = Arc::new(ScriptedRecognizer {
        locations: vec![FaceLocation::new(0, 10, 10, 0)],
        input_encodings: vec![encoding(0.1)],
        label_encodings: vec![encoding(0.1)],
        matches: vec![true],
        ..Default::default()
    });
    let router = router_for(Arc::clone(&recognizer));

    let same_label = png_base64(64, 64, [2, 2, 2]);
    for _ in 0..2 {
        let (status, _) = post_json(
            &router,
            "/commands/identify_face",
            json!({
                "input_image": png_base64(64, 64, [1, 1, 1]),
                "label_image": same_label.clone(),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // Same label image both times, so one whole-image encode.
    assert_eq!(recognizer.label_encode_calls.load(Ordering::SeqCst), 1);

    // A different label image forces recomputation.
    let (status, _) = post_json(
        &router,
        "/commands/identify_face",
        json!({
            "input_image": png_base64(64, 64, [1, 1, 1]),
            "label_image": png_base64(64, 64, [3, 3, 3]),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recognizer.label_encode_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let router = router_for(Arc::new(ScriptedRecognizer::default()));

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures at the browser boundary. None of them stop the frame loop:
/// they become placeholder text or a disabled gesture feature.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("no window object")]
    NoWindow,
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("HTTP {0}")]
    Http(u16),
    #[error("camera unavailable: {0}")]
    Camera(String),
    #[error("hand estimator failed: {0}")]
    Estimator(String),
    #[error("scheduling failed: {0}")]
    Scheduling(String),
}

/// Best-effort description of a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

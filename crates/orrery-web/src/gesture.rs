//! Periodic webcam hand sampling.
//!
//! A `GestureSession` owns the camera stream and a repeating task that feeds
//! video frames to a host-supplied hand-landmark estimator. Each pass yields a
//! `HandSample` delivered to a sink; the zoom decision itself lives in the game.

use std::cell::Cell;
use std::rc::Rc;
use glam::Vec3;
use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlVideoElement;
use crate::cadence::RepeatingTask;
use crate::camera_stream::CameraStream;
use crate::error::{describe, WebError};

/// Landmark index of the thumb tip in the 21-point hand model.
pub const THUMB_TIP: usize = 4;
/// Landmark index of the index-finger tip.
pub const INDEX_TIP: usize = 8;

/// Result of one sampling pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandSample {
    Pose { thumb: Vec3, index: Vec3 },
    NoHand,
}

impl HandSample {
    /// Pick the thumb and index tips out of a landmark list.
    /// Lists too short to contain both tips count as no hand.
    pub fn from_landmarks(points: &[[f32; 3]]) -> Self {
        match (points.get(THUMB_TIP), points.get(INDEX_TIP)) {
            (Some(t), Some(i)) => HandSample::Pose {
                thumb: Vec3::from_array(*t),
                index: Vec3::from_array(*i),
            },
            _ => HandSample::NoHand,
        }
    }

    /// Read the estimator's resolved value: an array of hands, each with a
    /// `landmarks` array of `[x, y, z]` triples (or `{x, y, z}` objects).
    fn from_estimate(value: &JsValue) -> Self {
        if !Array::is_array(value) {
            return HandSample::NoHand;
        }
        let hand = Array::from(value).get(0);
        if hand.is_undefined() || hand.is_null() {
            return HandSample::NoHand;
        }
        let landmarks = match Reflect::get(&hand, &JsValue::from_str("landmarks")) {
            Ok(v) if Array::is_array(&v) => Array::from(&v),
            _ => return HandSample::NoHand,
        };
        let points: Vec<[f32; 3]> = landmarks.iter().filter_map(|p| read_point(&p)).collect();
        Self::from_landmarks(&points)
    }
}

fn read_point(value: &JsValue) -> Option<[f32; 3]> {
    let coord = |key: &str, idx: u32| -> Option<f32> {
        let v = if Array::is_array(value) {
            Array::from(value).get(idx)
        } else {
            Reflect::get(value, &JsValue::from_str(key)).ok()?
        };
        v.as_f64().map(|f| f as f32)
    };
    // Missing depth is treated as zero.
    Some([coord("x", 0)?, coord("y", 1)?, coord("z", 2).unwrap_or(0.0)])
}

/// Camera stream plus the throttled sampling task. Drop to stop both.
pub struct GestureSession {
    // Declared first so the task stops before the camera is released.
    _task: RepeatingTask,
    _camera: Rc<CameraStream>,
}

impl GestureSession {
    /// Acquire the camera and start sampling every `interval_ms`.
    ///
    /// `estimator` is called with the video element and may return a value
    /// or a promise. A new estimate is not started while the previous one is
    /// still pending. Estimator errors are logged and reported as `NoHand`.
    pub async fn start(
        video: HtmlVideoElement,
        estimator: Function,
        interval_ms: u32,
        sink: Rc<dyn Fn(HandSample)>,
    ) -> Result<Self, WebError> {
        let camera = Rc::new(CameraStream::acquire(&video).await?);
        let in_flight = Rc::new(Cell::new(false));

        let task_camera = camera.clone();
        let task = RepeatingTask::start(interval_ms, move |token| {
            if in_flight.get() {
                return;
            }
            let pending = match estimator.call1(&JsValue::NULL, task_camera.video()) {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("{}", WebError::Estimator(describe(&e)));
                    sink(HandSample::NoHand);
                    return;
                }
            };
            in_flight.set(true);

            let in_flight = in_flight.clone();
            let sink = sink.clone();
            let token = token.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let sample = match JsFuture::from(Promise::resolve(&pending)).await {
                    Ok(v) => HandSample::from_estimate(&v),
                    Err(e) => {
                        log::warn!("{}", WebError::Estimator(describe(&e)));
                        HandSample::NoHand
                    }
                };
                in_flight.set(false);
                if !token.is_cancelled() {
                    sink(sample);
                }
            });
        })?;

        log::info!("gesture sampling every {} ms", interval_ms);
        Ok(Self {
            _task: task,
            _camera: camera,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand() -> Vec<[f32; 3]> {
        (0..21).map(|i| [i as f32, 2.0 * i as f32, -(i as f32)]).collect()
    }

    #[test]
    fn picks_thumb_and_index_tips() {
        match HandSample::from_landmarks(&hand()) {
            HandSample::Pose { thumb, index } => {
                assert_eq!(thumb, Vec3::new(4.0, 8.0, -4.0));
                assert_eq!(index, Vec3::new(8.0, 16.0, -8.0));
            }
            HandSample::NoHand => panic!("expected a pose"),
        }
    }

    #[test]
    fn short_lists_are_no_hand() {
        assert_eq!(HandSample::from_landmarks(&[]), HandSample::NoHand);
        assert_eq!(HandSample::from_landmarks(&hand()[..8]), HandSample::NoHand);
    }
}

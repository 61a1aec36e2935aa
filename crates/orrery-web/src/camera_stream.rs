use wasm_bindgen::{JsCast as _, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};
use crate::error::{describe, WebError};

/// A webcam stream attached to a video element.
/// Dropping it stops every track and detaches the element.
pub struct CameraStream {
    stream: MediaStream,
    video: HtmlVideoElement,
}

impl CameraStream {
    /// Ask for the user's camera and start playing it into `video`.
    pub async fn acquire(video: &HtmlVideoElement) -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| WebError::Camera(describe(&e)))?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&JsValue::TRUE);
        constraints.set_audio(&JsValue::FALSE);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| WebError::Camera(describe(&e)))?;
        let stream: MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| WebError::Camera(describe(&e)))?
            .dyn_into()
            .map_err(|_| WebError::Camera("getUserMedia did not return a MediaStream".into()))?;

        // Owned from here on, so an early return below still releases the camera.
        let camera = Self {
            stream,
            video: video.clone(),
        };
        camera.video.set_src_object(Some(&camera.stream));
        let playing = camera.video.play().map_err(|e| WebError::Camera(describe(&e)))?;
        JsFuture::from(playing)
            .await
            .map_err(|e| WebError::Camera(describe(&e)))?;

        log::info!("camera stream started");
        Ok(camera)
    }

    pub fn video(&self) -> &HtmlVideoElement {
        &self.video
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        self.video.set_src_object(None);
        log::info!("camera stream released");
    }
}

/// Hand-gesture zoom: thumb-to-index distance drives the target zoom.

use glam::Vec3;
use crate::zoom::ZoomState;

/// Where a pinch distance falls relative to the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinchZone {
    /// Fingers together: zoom target decreases.
    Near,
    /// Between thresholds: no change.
    DeadZone,
    /// Fingers apart: zoom target increases.
    Far,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureZoomEstimator {
    near: f32,
    far: f32,
    step: f32,
}

impl GestureZoomEstimator {
    pub fn new(near: f32, far: f32, step: f32) -> Self {
        Self { near, far, step }
    }

    pub fn pinch_distance(thumb: Vec3, index: Vec3) -> f32 {
        thumb.distance(index)
    }

    pub fn classify(&self, distance: f32) -> PinchZone {
        if distance < self.near {
            PinchZone::Near
        } else if distance > self.far {
            PinchZone::Far
        } else {
            // NaN lands here too.
            PinchZone::DeadZone
        }
    }

    /// Apply one distance sample to the zoom target. Returns the zone hit.
    pub fn apply(&self, distance: f32, zoom: &mut ZoomState) -> PinchZone {
        let zone = self.classify(distance);
        match zone {
            PinchZone::Near => zoom.nudge_target(-self.step),
            PinchZone::Far => zoom.nudge_target(self.step),
            PinchZone::DeadZone => {}
        }
        zone
    }

    /// Apply a thumb/index landmark pair.
    pub fn apply_pose(&self, thumb: Vec3, index: Vec3, zoom: &mut ZoomState) -> PinchZone {
        self.apply(Self::pinch_distance(thumb, index), zoom)
    }
}

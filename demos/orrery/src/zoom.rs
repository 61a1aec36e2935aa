/// Camera distance smoothing.
///
/// `ZoomState` holds the current and target distance and keeps the target
/// inside the limits. `ZoomController` moves the current value toward the
/// target by a fixed fraction each frame.

use orrery_engine::lerp;

/// Relative gap below which the current value snaps onto the target.
const SNAP_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
}

impl ZoomLimits {
    /// Limits from two bounds in either order.
    pub fn new(a: f32, b: f32) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    current: f32,
    target: f32,
    limits: ZoomLimits,
}

impl ZoomState {
    /// Both values start at `initial`, clamped into `limits`.
    pub fn new(initial: f32, limits: ZoomLimits) -> Self {
        let start = limits.clamp(initial);
        Self {
            current: start,
            target: start,
            limits,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Set the target, clamped into the limits. NaN is ignored.
    pub fn set_target(&mut self, target: f32) {
        if target.is_nan() {
            return;
        }
        self.target = self.limits.clamp(target);
    }

    pub fn nudge_target(&mut self, delta: f32) {
        self.set_target(self.target + delta);
    }

    /// Change the limits and re-clamp the target. The current value is left
    /// to converge on its own.
    pub fn set_limits(&mut self, limits: ZoomLimits) {
        self.limits = limits;
        self.target = limits.clamp(self.target);
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomController {
    alpha: f32,
}

impl ZoomController {
    pub const DEFAULT_ALPHA: f32 = 0.1;

    /// `alpha` outside (0, 1] falls back to the default.
    pub fn new(alpha: f32) -> Self {
        let alpha = if alpha > 0.0 && alpha <= 1.0 {
            alpha
        } else {
            log::warn!("zoom smoothing {} out of range, using {}", alpha, Self::DEFAULT_ALPHA);
            Self::DEFAULT_ALPHA
        };
        Self { alpha }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// One frame of smoothing. Returns the new current value.
    pub fn step(&self, state: &mut ZoomState) -> f32 {
        let next = lerp(state.current, state.target, self.alpha);
        let snap = SNAP_EPSILON * state.target.abs().max(1.0);
        state.current = if (next - state.target).abs() <= snap {
            state.target
        } else {
            next
        };
        state.current
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALPHA)
    }
}

/// Variable-rate frame clock.
///
/// Body motion is driven by the real elapsed time of each rendered frame.
/// Raw host deltas are sanitised here: negative or non-finite values become
/// zero (orbits never run backwards) and long stalls, such as a background
/// tab resuming, are capped so bodies do not jump.
pub struct FrameClock {
    max_dt: f32,
    elapsed: f64,
    frames: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt: max_dt.max(0.0),
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Sanitise a raw frame delta (seconds) and account for it.
    pub fn advance(&mut self, raw_dt: f32) -> f32 {
        let dt = sanitize_dt(raw_dt, self.max_dt);
        self.elapsed += dt as f64;
        self.frames += 1;
        dt
    }

    /// Total sanitised time since mount, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

/// Clamp a delta into `[0, max_dt]`, mapping NaN/infinite input to zero.
pub fn sanitize_dt(raw_dt: f32, max_dt: f32) -> f32 {
    if !raw_dt.is_finite() || raw_dt <= 0.0 {
        return 0.0;
    }
    raw_dt.min(max_dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_normal_delta() {
        let mut clock = FrameClock::new(0.25);
        assert_eq!(clock.advance(1.0 / 60.0), 1.0 / 60.0);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn negative_and_nan_become_zero() {
        let mut clock = FrameClock::new(0.25);
        assert_eq!(clock.advance(-0.5), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.advance(f32::INFINITY), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.frames(), 3);
    }

    #[test]
    fn caps_long_stalls() {
        let mut clock = FrameClock::new(0.25);
        assert_eq!(clock.advance(3.0), 0.25);
        assert!((clock.elapsed() - 0.25).abs() < 1e-9);
    }
}

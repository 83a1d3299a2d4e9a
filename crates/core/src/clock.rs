//! Frame timing and the cube's rotation angle.
//!
//! The browser hands every animation frame a timestamp in milliseconds.
//! [`FrameClock`] turns consecutive timestamps into a delta in seconds and
//! [`Rotation`] accumulates those deltas into the angle, unbounded.

/// Converts animation-frame timestamps into per-frame deltas.
///
/// The previous timestamp starts at zero, so the first delta equals the
/// first timestamp (time since the page started).
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    then: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the seconds elapsed since the previous tick.
    ///
    /// A timestamp older than the previous one yields zero so the angle
    /// never runs backwards.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let now = now_ms * 0.001;
        let delta = (now - self.then).max(0.0);
        self.then = self.then.max(now);
        delta as f32
    }

    /// The last accepted timestamp, in seconds.
    pub fn then(&self) -> f64 {
        self.then
    }
}

/// The scalar rotation shared by all passes of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    angle: f32,
}

impl Rotation {
    pub fn new(initial: f32) -> Self {
        Self { angle: initial }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Adds `delta` and returns the angle the current frame is drawn with,
    /// i.e. the value before the increment.
    pub fn advance(&mut self, delta: f32) -> f32 {
        let drawn = self.angle;
        self.angle += delta;
        drawn
    }
}

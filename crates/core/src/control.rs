//! Constants shared by every demo in the e-book series.

use crate::clock::Rotation;

/// Radians added to the rotation per frame in fixed-step mode.
pub const ROTATION_STEP: f32 = 0.5;

/// Maximum number of frames a fixed-step animation runs.
pub const FRAME_MAX: usize = 512;

/// Fixed-step animation settings, used where no wall clock exists
/// (headless planning, tests).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoControl {
    pub rotation_step: f32,
    pub frame_max: usize,
}

impl Default for DemoControl {
    fn default() -> Self {
        Self {
            rotation_step: ROTATION_STEP,
            frame_max: FRAME_MAX,
        }
    }
}

impl DemoControl {
    /// Yields the drawn angle for each of `frames` frames (capped at
    /// `frame_max`), advancing `rotation` by the fixed step.
    pub fn angles(&self, rotation: &mut Rotation, frames: usize) -> Vec<f32> {
        (0..frames.min(self.frame_max))
            .map(|_| rotation.advance(self.rotation_step))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_series_constants() {
        let control = DemoControl::default();
        assert_eq!(control.rotation_step, 0.5);
        assert_eq!(control.frame_max, 512);
    }

    #[test]
    fn angles_step_by_fixed_amount_from_initial() {
        let mut rotation = Rotation::new(0.1);
        let angles = DemoControl::default().angles(&mut rotation, 3);
        assert_eq!(angles.len(), 3);
        assert!((angles[0] - 0.1).abs() < 1e-6);
        assert!((angles[1] - 0.6).abs() < 1e-6);
        assert!((angles[2] - 1.1).abs() < 1e-6);
        assert!((rotation.angle() - 1.6).abs() < 1e-6);
    }

    #[test]
    fn frames_are_capped_at_frame_max() {
        let control = DemoControl {
            rotation_step: 0.5,
            frame_max: 8,
        };
        let angles = control.angles(&mut Rotation::new(0.0), 1000);
        assert_eq!(angles.len(), 8);
    }
}

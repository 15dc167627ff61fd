//! Camera angle state.
//!
//! The drag state machine (`input::DragTracker`) produces raw vertical
//! deltas; what a delta means is up to the task. [`CameraAngle`] is the stock
//! interpretation: a single pitch angle in degrees, clamped to ±90.

const MIN_DEGREES: f32 = -90.0;
const MAX_DEGREES: f32 = 90.0;

/// Drag-to-angle sensitivity in degrees per pixel of vertical motion.
const DEGREES_PER_PIXEL: f32 = 0.5;

/// A camera pitch angle clamped to `[-90, +90]` degrees.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CameraAngle {
    degrees: f32,
}

impl CameraAngle {
    pub fn new(degrees: f32) -> Self {
        Self {
            degrees: degrees.clamp(MIN_DEGREES, MAX_DEGREES),
        }
    }

    pub fn degrees(self) -> f32 {
        self.degrees
    }

    pub fn radians(self) -> f32 {
        self.degrees.to_radians()
    }

    /// Applies a vertical drag delta (positive = pointer moved down).
    ///
    /// Dragging down tilts the camera up, matching the usual orbit feel.
    pub fn drag(&mut self, delta_y: f32) {
        self.degrees = (self.degrees - delta_y * DEGREES_PER_PIXEL).clamp(MIN_DEGREES, MAX_DEGREES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_scales_delta_by_half() {
        let mut angle = CameraAngle::default();
        angle.drag(-10.0);
        assert_eq!(angle.degrees(), 5.0);
    }

    #[test]
    fn drag_never_exceeds_upper_bound() {
        let mut angle = CameraAngle::default();
        for _ in 0..50 {
            angle.drag(-200.0);
        }
        assert_eq!(angle.degrees(), 90.0);
    }

    #[test]
    fn drag_never_exceeds_lower_bound() {
        let mut angle = CameraAngle::default();
        for _ in 0..50 {
            angle.drag(200.0);
        }
        assert_eq!(angle.degrees(), -90.0);
    }

    #[test]
    fn zero_delta_is_a_no_op() {
        let mut angle = CameraAngle::new(37.0);
        angle.drag(0.0);
        assert_eq!(angle.degrees(), 37.0);
    }

    #[test]
    fn new_clamps_out_of_range_input() {
        assert_eq!(CameraAngle::new(400.0).degrees(), 90.0);
        assert_eq!(CameraAngle::new(-400.0).degrees(), -90.0);
    }
}

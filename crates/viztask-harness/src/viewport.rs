//! Viewport management.
//!
//! Computes the drawable pixel rect from the available layout width under a
//! fixed aspect ratio and applies it to the live [`RenderSurface`]. The
//! session calls [`ViewportManager::apply`] once before the first frame and
//! again on every host resize notification.

/// Width:height ratio, stored as integer numerator/denominator so the height
/// computation floors exactly like the reference layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    pub const SIXTEEN_NINE: AspectRatio = AspectRatio {
        width: 16,
        height: 9,
    };
}

/// Layout configuration constants.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Horizontal space reserved around the drawable area, in pixels.
    pub margin: u32,

    /// Upper bound on the drawable width, in pixels.
    pub max_width: u32,

    /// Fixed aspect ratio of the drawable area.
    pub aspect: AspectRatio,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 20,
            max_width: 820,
            aspect: AspectRatio::SIXTEEN_NINE,
        }
    }
}

impl LayoutConfig {
    /// Computes `(width, height)` for the given available layout width.
    ///
    /// `width = min(available_width - margin, max_width)`,
    /// `height = floor(width * aspect.height / aspect.width)`.
    pub fn compute(&self, available_width: u32) -> (u32, u32) {
        let width = available_width.saturating_sub(self.margin).min(self.max_width);
        let height = width * self.aspect.height / self.aspect.width;
        (width, height)
    }
}

/// The drawable area as seen by tasks.
///
/// Owned by the session and resized in place on layout change, never
/// recreated. Dimensions always satisfy the configured aspect ratio.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RenderSurface {
    pub width: u32,
    pub height: u32,
}

impl RenderSurface {
    /// Whether a pointer position (window pixels, top-left origin) lies over
    /// the drawable rect. The rect is anchored at the origin and can be
    /// smaller than the window.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32
    }
}

/// Applies layout changes to a [`RenderSurface`].
#[derive(Debug, Copy, Clone)]
pub struct ViewportManager {
    layout: LayoutConfig,
}

impl ViewportManager {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Recomputes the drawable rect and applies it to `surface` in place.
    ///
    /// Returns `true` if the surface dimensions changed. Idempotent: a second
    /// call with unchanged input leaves the live values untouched.
    pub fn apply(&self, surface: &mut RenderSurface, available_width: u32) -> bool {
        let (width, height) = self.layout.compute(available_width);
        if surface.width == width && surface.height == height {
            return false;
        }

        surface.width = width;
        surface.height = height;
        log::debug!("render surface resized to {width}x{height}");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ViewportManager {
        ViewportManager::new(LayoutConfig::default())
    }

    // ── compute ───────────────────────────────────────────────────────────

    #[test]
    fn compute_clamps_to_max_width() {
        assert_eq!(LayoutConfig::default().compute(840), (820, 461));
    }

    #[test]
    fn compute_narrow_layout() {
        assert_eq!(LayoutConfig::default().compute(500), (480, 270));
    }

    #[test]
    fn compute_width_below_margin_is_empty() {
        assert_eq!(LayoutConfig::default().compute(10), (0, 0));
    }

    #[test]
    fn compute_height_floors() {
        // 300 * 9 / 16 = 168.75
        assert_eq!(LayoutConfig::default().compute(320), (300, 168));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_interior_point() {
        let surface = RenderSurface { width: 820, height: 461 };
        assert!(surface.contains(400.0, 200.0));
    }

    #[test]
    fn contains_rejects_points_beyond_the_drawable_rect() {
        let surface = RenderSurface { width: 820, height: 461 };
        assert!(!surface.contains(830.0, 200.0));
        assert!(!surface.contains(400.0, 470.0));
        assert!(!surface.contains(-1.0, 200.0));
    }

    #[test]
    fn contains_top_left_inclusive_bottom_right_exclusive() {
        let surface = RenderSurface { width: 820, height: 461 };
        assert!(surface.contains(0.0, 0.0));
        assert!(!surface.contains(820.0, 461.0));
    }

    // ── apply ─────────────────────────────────────────────────────────────

    #[test]
    fn apply_updates_surface_in_place() {
        let mut surface = RenderSurface::default();
        assert!(manager().apply(&mut surface, 840));
        assert_eq!(surface, RenderSurface { width: 820, height: 461 });
    }

    #[test]
    fn apply_is_idempotent() {
        let mut surface = RenderSurface::default();
        let vm = manager();
        assert!(vm.apply(&mut surface, 500));
        let snapshot = surface;
        assert!(!vm.apply(&mut surface, 500));
        assert_eq!(surface, snapshot);
    }

    #[test]
    fn apply_reacts_to_layout_change() {
        let mut surface = RenderSurface::default();
        let vm = manager();
        vm.apply(&mut surface, 840);
        assert!(vm.apply(&mut surface, 500));
        assert_eq!(surface, RenderSurface { width: 480, height: 270 });
    }
}

//! Overhead perspective camera looking straight down at the origin.
//!
//! Only the height moves: runs frame the drop zone, the mouse wheel zooms.

pub const FOV_DEG: f32 = 60.0;
pub const INITIAL_HEIGHT: f32 = 15.0;

const ZOOM_SPEED: f32 = 0.01;
const ZOOM_MIN: f32 = 3.0;
const ZOOM_MAX: f32 = 50.0;

/// Framing a run never brings the camera closer than this
const FRAME_MIN: f32 = 5.0;
/// Drop zone padding when framing
const FRAME_PADDING: f32 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewCamera {
    pub fov_deg: f32,
    /// Viewport width / height
    pub aspect: f32,
    pub height: f32,
}

impl ViewCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            fov_deg: FOV_DEG,
            aspect: sanitize_aspect(aspect),
            height: INITIAL_HEIGHT,
        }
    }

    #[inline]
    pub fn half_fov_rad(&self) -> f32 {
        (self.fov_deg * 0.5).to_radians()
    }

    /// Lift the camera until the whole `[-R, R]` square is in view.
    pub fn frame_spread(&mut self, spread_radius: f32) {
        let half_w = spread_radius * FRAME_PADDING;
        let half_h = half_w / self.aspect;
        let half_visible = half_w.max(half_h);
        self.height = (half_visible / self.half_fov_rad().tan()).clamp(FRAME_MIN, ZOOM_MAX);
    }

    /// Wheel delta (pixels) moves the camera up or down.
    pub fn zoom(&mut self, delta_y: f32) {
        if !delta_y.is_finite() {
            return;
        }
        self.height = (self.height + delta_y * ZOOM_SPEED).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn resize(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
    }
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 }
}

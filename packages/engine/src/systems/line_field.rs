//! Ruling lines visible from the overhead camera.

use crate::camera::ViewCamera;

/// Extra coverage beyond the visible half extent
const MARGIN: f32 = 1.2;
/// Upper bound on the half extent
const MAX_RANGE: f32 = 100.0;
/// Most lines ever drawn. Denser rulings are thinned to every n-th line.
pub const MAX_LINES: usize = 401;
/// Lines float just above the floor to avoid z-fighting
pub const LINE_HEIGHT: f32 = 0.01;

/// One ruling line: constant x, spanning `z_min..=z_max`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    pub x: f32,
    pub z_min: f32,
    pub z_max: f32,
}

/// Half extent of the area to rule, in world units
pub fn visible_range(camera: &ViewCamera) -> f32 {
    let half_h = camera.height * camera.half_fov_rad().tan();
    let half_w = half_h * camera.aspect;
    (half_h.max(half_w) * MARGIN).ceil().min(MAX_RANGE)
}

/// Lines at every multiple of `spacing` within the visible range,
/// symmetric about x = 0. Replaces whatever `out` held.
///
/// When the ruling is denser than `MAX_LINES`, only every n-th line is
/// drawn; x = 0 is always kept.
pub fn compute_lines(camera: &ViewCamera, spacing: f32, out: &mut Vec<LineSegment>) {
    out.clear();
    if !spacing.is_finite() || spacing <= 0.0 {
        return;
    }

    let range = visible_range(camera);
    let half = (range as f64 / spacing as f64).floor();
    let stride = ((2.0 * half + 1.0) / MAX_LINES as f64).ceil().max(1.0);
    let step = spacing as f64 * stride;
    let k_max = ((half / stride).floor() as i64).min((MAX_LINES as i64 - 1) / 2);

    out.reserve((2 * k_max + 1) as usize);
    for k in -k_max..=k_max {
        // Index-based so the positions do not drift with float accumulation.
        let x = (k as f64 * step) as f32;
        out.push(LineSegment { x, z_min: -range, z_max: range });
    }
}

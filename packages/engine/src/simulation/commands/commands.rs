use crate::domain::error::Result;
use crate::domain::params::SimulationParams;
use crate::line_field::compute_lines;
use crate::physics_backend::PhysicsBackend;

use super::session::RunSession;
use super::SimulationCore;

pub(super) fn start<P: PhysicsBackend>(core: &mut SimulationCore<P>, params: SimulationParams) -> Result<()> {
    // Validate before touching anything: a rejected start leaves the
    // current run as it was.
    let params = match params.validated() {
        Ok(p) => p,
        Err(e) => {
            log::warn!("run rejected: {e}");
            return Err(e);
        }
    };

    clear(core);

    core.camera.frame_spread(params.spread_radius);
    redraw_lines(core, params.line_spacing);

    core.session = Some(RunSession::new(params, core.config.batch_size));
    log::info!(
        "run started: L={} d={} N={} R={}",
        params.needle_length,
        params.line_spacing,
        params.needle_count,
        params.spread_radius
    );

    super::rigid::release_next_batch(core);
    super::render_extract::extract_instances(core);
    Ok(())
}

pub(super) fn clear<P: PhysicsBackend>(core: &mut SimulationCore<P>) {
    core.physics.clear();
    core.session = None;
    core.frame = 0;
    core.render.instances.clear();
}

pub(super) fn zoom<P: PhysicsBackend>(core: &mut SimulationCore<P>, delta_y: f32) {
    core.camera.zoom(delta_y);
    redraw_lines(core, current_spacing(core));
}

pub(super) fn resize<P: PhysicsBackend>(core: &mut SimulationCore<P>, aspect: f32) {
    core.camera.resize(aspect);
    redraw_lines(core, current_spacing(core));
}

/// Rebuild the ruling for the current camera and replace the line buffer.
pub(super) fn redraw_lines<P: PhysicsBackend>(core: &mut SimulationCore<P>, spacing: f32) {
    compute_lines(&core.camera, spacing, &mut core.line_segments);
    super::render_extract::extract_lines(core);
}

fn current_spacing<P: PhysicsBackend>(core: &SimulationCore<P>) -> f32 {
    core.session.as_ref().map_or(1.0, |s| s.params.line_spacing)
}

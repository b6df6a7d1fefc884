use crate::physics_backend::PhysicsBackend;

use super::SimulationCore;

/// Floats per needle instance: position xyz, rotation xyzw, packed RGB
pub const INSTANCE_STRIDE: usize = 8;
/// Floats per ruling line: x, z_min, z_max
pub const LINE_STRIDE: usize = 3;

/// Rewrite the instance buffer from the poses of every active needle.
pub(super) fn extract_instances<P: PhysicsBackend>(core: &mut SimulationCore<P>) {
    let buf = &mut core.render.instances;
    buf.clear();

    let Some(session) = core.session.as_ref() else {
        return;
    };
    buf.reserve(session.needles.len() * INSTANCE_STRIDE);

    for needle in &session.needles {
        let Some(pose) = core.physics.pose(needle.body) else {
            continue;
        };
        let p = pose.position;
        let q = pose.orientation;
        buf.extend_from_slice(&[p.x, p.y, p.z, q.x, q.y, q.z, q.w, needle.status.color() as f32]);
    }
}

/// Rewrite the line buffer from the current ruling.
pub(super) fn extract_lines<P: PhysicsBackend>(core: &mut SimulationCore<P>) {
    let buf = &mut core.render.lines;
    buf.clear();
    buf.reserve(core.line_segments.len() * LINE_STRIDE);
    for line in &core.line_segments {
        buf.extend_from_slice(&[line.x, line.z_min, line.z_max]);
    }
}

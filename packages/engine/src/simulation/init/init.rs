use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::camera::ViewCamera;
use crate::domain::params::SimulationConfig;
use crate::physics_backend::PhysicsBackend;
use crate::rest_detector::RestDetector;

use super::perf_stats::PerfStats;
use super::{RenderBuffers, SimulationCore};

/// Seed used when the config does not pin one
const DEFAULT_SEED: u64 = 12345;

pub(super) fn create_core<P: PhysicsBackend>(
    physics: P,
    config: SimulationConfig,
    aspect: f32,
) -> SimulationCore<P> {
    let rng = SmallRng::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED));
    let rest = RestDetector::new(config.stillness_threshold);

    let mut core = SimulationCore {
        physics,
        config,
        rest,
        rng,
        camera: ViewCamera::new(aspect),
        line_segments: Vec::new(),
        session: None,
        frame: 0,
        render: RenderBuffers {
            instances: Vec::new(),
            // Start with a small buffer; line extraction grows it on demand.
            lines: Vec::with_capacity(64),
        },
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    };

    // Default ruling (d = 1) so the floor is never blank before the first run.
    super::commands::redraw_lines(&mut core, 1.0);
    core
}

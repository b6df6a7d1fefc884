use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::physics_backend::PhysicsBackend;

use super::perf_stats::PerfStats;
use super::SimulationCore;

pub(super) fn set_stillness_threshold<P: PhysicsBackend>(core: &mut SimulationCore<P>, threshold: f32) {
    if threshold.is_finite() && threshold > 0.0 {
        core.config.stillness_threshold = threshold;
        core.rest.threshold = threshold;
    }
}

/// Takes effect on the next start.
pub(super) fn set_batch_size<P: PhysicsBackend>(core: &mut SimulationCore<P>, batch_size: u32) {
    core.config.batch_size = batch_size.max(1);
}

pub(super) fn set_timestep<P: PhysicsBackend>(core: &mut SimulationCore<P>, timestep: f32) {
    if timestep.is_finite() && timestep > 0.0 {
        core.config.timestep = timestep;
    }
}

pub(super) fn set_seed<P: PhysicsBackend>(core: &mut SimulationCore<P>, seed: u64) {
    core.config.seed = Some(seed);
    core.rng = SmallRng::seed_from_u64(seed);
}

pub(super) fn enable_perf_metrics<P: PhysicsBackend>(core: &mut SimulationCore<P>, enabled: bool) {
    core.perf_enabled = enabled;
    if !enabled {
        core.perf_stats = PerfStats::default();
    }
}

pub(super) fn get_perf_stats<P: PhysicsBackend>(core: &SimulationCore<P>) -> PerfStats {
    core.perf_stats.clone()
}

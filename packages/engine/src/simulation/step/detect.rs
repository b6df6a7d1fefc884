use crate::crossing::{classify, Crossing};
use crate::domain::needle::NeedleStatus;
use crate::physics_backend::PhysicsBackend;

use super::SimulationCore;

/// Rest detection + crossing classification for every needle still moving.
/// Returns how many needles resolved this tick.
pub(super) fn detect_settled<P: PhysicsBackend>(core: &mut SimulationCore<P>) -> u32 {
    let Some(session) = core.session.as_mut() else {
        return 0;
    };
    let length = session.params.needle_length;
    let spacing = session.params.line_spacing;
    let mut resolved = 0;

    for needle in session.needles.iter_mut() {
        let speed = core.physics.speed(needle.body);
        if !core.rest.observe(needle, speed) {
            continue;
        }

        // A body the backend lost has nothing left to cross with.
        let crossing = core
            .physics
            .pose(needle.body)
            .map_or(Crossing::Clear, |pose| classify(&pose, length, spacing));

        session.tally.record(crossing.is_hit());
        resolved += 1;

        if crossing.is_hit() {
            needle.status = NeedleStatus::Crossed;
        } else {
            core.physics.remove_body(needle.body);
            needle.status = NeedleStatus::SettledNoCross;
        }
        log::debug!("needle {} settled: {:?}", needle.id, crossing);
    }

    resolved
}

/// Drop needles that settled clear of every line from the active set.
pub(super) fn prune_removed<P: PhysicsBackend>(core: &mut SimulationCore<P>) -> u32 {
    let Some(session) = core.session.as_mut() else {
        return 0;
    };

    let mut pruned = 0;
    for needle in session.needles.iter_mut() {
        if needle.status == NeedleStatus::SettledNoCross {
            needle.status = NeedleStatus::Removed;
            pruned += 1;
        }
    }
    if pruned > 0 {
        session.needles.retain(|n| n.status != NeedleStatus::Removed);
        session.removed += pruned;
    }
    pruned
}

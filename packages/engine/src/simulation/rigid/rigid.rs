use crate::domain::needle::Needle;
use crate::needle_factory::create_needle;
use crate::physics_backend::PhysicsBackend;

use super::SimulationCore;

/// Release the next wave of needles. Returns how many were spawned
/// (0 when the run has already thrown everything).
pub(super) fn release_next_batch<P: PhysicsBackend>(core: &mut SimulationCore<P>) -> u32 {
    let Some(session) = core.session.as_mut() else {
        return 0;
    };
    let Some(batch) = session.scheduler.release() else {
        return 0;
    };

    session.tally.begin_batch();
    let length = session.params.needle_length;
    let spread = session.params.spread_radius;

    for _ in 0..batch.count {
        let desc = create_needle(&mut core.rng, length, spread);
        let body = core.physics.add_body(desc);
        let id = session.next_needle_id;
        session.next_needle_id = session.next_needle_id.saturating_add(1);
        session.needles.push(Needle::new(id, body, batch.index));
    }

    let progress = session.scheduler.progress();
    log::info!(
        "batch {} released: {} needles ({})",
        batch.index,
        batch.count,
        progress.label()
    );
    batch.count
}

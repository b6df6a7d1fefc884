use crate::physics_backend::PhysicsBackend;

use super::{PerfTimer, SimulationCore, SimulationState};

pub(super) fn advance<P: PhysicsBackend>(core: &mut SimulationCore<P>, dt: f32) -> SimulationState {
    // Finished runs stay finished; no more physics until the next start.
    match core.state() {
        SimulationState::Running => {}
        other => return other,
    }

    let perf_on = core.perf_enabled;
    let tick = PerfTimer::start();

    // === PHYSICS ===
    let ((), physics_ms) = PerfTimer::measure(perf_on, || core.physics.step(dt));

    // === REST DETECTION + CROSSING ===
    let (resolved, detect_ms) = PerfTimer::measure(perf_on, || super::detect::detect_settled(core));
    let pruned = super::detect::prune_removed(core);

    // === WAVES ===
    let wave_done = core.session.as_ref().map(|s| (s.wave_settled(), s.scheduler.has_remaining()));
    match wave_done {
        Some((true, true)) => {
            super::rigid::release_next_batch(core);
        }
        Some((true, false)) => finish(core),
        _ => {}
    }

    // === RENDER SYNC ===
    let ((), extract_ms) = PerfTimer::measure(perf_on, || super::render_extract::extract_instances(core));

    if perf_on {
        let live_bodies = core.physics.body_count() as u32;
        let stats = &mut core.perf_stats;
        stats.reset();
        stats.physics_ms = physics_ms;
        stats.detect_ms = detect_ms;
        stats.extract_ms = extract_ms;
        stats.resolved_this_tick = resolved;
        stats.pruned = pruned;
        stats.live_bodies = live_bodies;
        stats.frame = core.frame;
        stats.step_ms = tick.elapsed_ms();
    }

    core.frame += 1;
    core.state()
}

/// Record the terminal result. Runs once per session.
fn finish<P: PhysicsBackend>(core: &mut SimulationCore<P>) {
    let frame = core.frame;
    let Some(session) = core.session.as_mut() else {
        return;
    };
    if session.result_shown {
        return;
    }

    let estimate = session
        .tally
        .cumulative_estimate(session.params.needle_length, session.params.line_spacing);
    session.final_estimate = Some(estimate);
    session.result_shown = true;

    log::info!(
        "run finished after {} frames: {}",
        frame + 1,
        estimate.to_string().replace('\n', " ")
    );
}

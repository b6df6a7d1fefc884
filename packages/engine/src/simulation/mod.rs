//! Simulation core - one Buffon run at a time
//!
//! `SimulationCore` owns everything that outlives a run (physics backend,
//! camera, line field, RNG, render buffers) and a `RunSession` that is
//! rebuilt from scratch on every start/reset.
//!
//! Per-concern logic lives in submodules:
//! - step/      - one tick: physics, rest detection, classification, waves
//! - commands/  - start/reset, zoom, resize
//! - render/    - flat buffers the JS renderer reads
//! - drive.rs   - frame scheduling shell around `advance`

use rand::rngs::SmallRng;
use serde::Serialize;

use crate::batch::Progress;
use crate::camera::ViewCamera;
use crate::domain::error::Result;
use crate::domain::params::{SimulationConfig, SimulationParams};
use crate::estimator::{Estimate, Tally};
use crate::line_field::LineSegment;
use crate::physics_backend::PhysicsBackend;
use crate::rest_detector::RestDetector;
use crate::rigid_body_system::RigidBodySystem;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/commands.rs"]
mod commands;
#[path = "rigid/rigid.rs"]
mod rigid;
#[path = "step/detect.rs"]
mod detect;
#[path = "step/step.rs"]
mod step;
#[path = "render/render_extract.rs"]
mod render_extract;
mod session;
pub mod drive;
mod facade;

pub use drive::{DriveLoop, DriveState, FrameHandle, FrameScheduler};
pub use facade::{JsFrameScheduler, Simulation};
pub use perf_stats::PerfStats;
pub use render_extract::{INSTANCE_STRIDE, LINE_STRIDE};

use perf_timer::PerfTimer;
use session::RunSession;

/// Where the core is in its lifecycle, as reported by `advance`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SimulationState {
    /// No run started yet
    Idle,
    /// Needles still falling or waves still pending
    Running,
    /// Every needle settled; the result is final
    Finished,
}

pub(crate) struct RenderBuffers {
    /// `INSTANCE_STRIDE` floats per active needle
    instances: Vec<f32>,
    /// `LINE_STRIDE` floats per ruling line
    lines: Vec<f32>,
}

/// Serializable snapshot for the host UI
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub state: SimulationState,
    pub frame: u64,
    pub progress: Progress,
    pub tally: Tally,
    pub removed: u32,
    pub live_needles: usize,
    pub estimate: Option<Estimate>,
    pub result_text: String,
}

/// The simulation: physics plus the settle/classify/estimate protocol
pub struct SimulationCore<P: PhysicsBackend = RigidBodySystem> {
    physics: P,
    config: SimulationConfig,
    rest: RestDetector,
    rng: SmallRng,

    camera: ViewCamera,
    line_segments: Vec<LineSegment>,

    /// Current run; `None` until the first start
    session: Option<RunSession>,
    frame: u64,

    render: RenderBuffers,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SimulationCore<RigidBodySystem> {
    /// Core with the built-in rigid-body backend
    pub fn new(config: SimulationConfig, aspect: f32) -> Self {
        let physics = RigidBodySystem::new(config.gravity);
        init::create_core(physics, config, aspect)
    }
}

impl<P: PhysicsBackend> SimulationCore<P> {
    /// Core driving a caller-supplied backend
    pub fn with_backend(physics: P, config: SimulationConfig, aspect: f32) -> Self {
        init::create_core(physics, config, aspect)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    pub fn camera(&self) -> &ViewCamera {
        &self.camera
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Params of the current run, if any
    pub fn params(&self) -> Option<&SimulationParams> {
        self.session.as_ref().map(|s| &s.params)
    }

    pub fn set_stillness_threshold(&mut self, threshold: f32) {
        settings::set_stillness_threshold(self, threshold);
    }

    pub fn set_batch_size(&mut self, batch_size: u32) {
        settings::set_batch_size(self, batch_size);
    }

    pub fn set_timestep(&mut self, timestep: f32) {
        settings::set_timestep(self, timestep);
    }

    pub fn set_seed(&mut self, seed: u64) {
        settings::set_seed(self, seed);
    }

    /// Enable or disable per-tick perf metrics
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last tick perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === RUN CONTROL ===

    /// Validate `params`, tear down the previous run and release the first wave.
    ///
    /// On error nothing changes.
    pub fn start(&mut self, params: SimulationParams) -> Result<()> {
        commands::start(self, params)
    }

    /// Drop every needle and forget the current run.
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    /// Mouse wheel: move the camera and redraw the ruling.
    pub fn zoom(&mut self, delta_y: f32) {
        commands::zoom(self, delta_y)
    }

    pub fn resize(&mut self, aspect: f32) {
        commands::resize(self, aspect)
    }

    /// One tick with the configured timestep
    pub fn advance(&mut self) -> SimulationState {
        let dt = self.config.timestep;
        self.advance_by(dt)
    }

    /// One tick: step physics, settle/classify, prune, schedule waves.
    pub fn advance_by(&mut self, dt: f32) -> SimulationState {
        step::advance(self, dt)
    }

    pub fn state(&self) -> SimulationState {
        match &self.session {
            None => SimulationState::Idle,
            Some(s) if s.result_shown => SimulationState::Finished,
            Some(_) => SimulationState::Running,
        }
    }

    // === RESULTS ===

    pub fn tally(&self) -> Tally {
        self.session.as_ref().map(|s| s.tally).unwrap_or_default()
    }

    /// Needles removed after settling clear of every line
    pub fn removed_count(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.removed)
    }

    /// Needles still in the scene (falling, or settled across a line)
    pub fn live_needle_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.needles.len())
    }

    /// Waves released so far this run
    pub fn batches_released(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.scheduler.invocations())
    }

    pub fn progress(&self) -> Progress {
        match &self.session {
            Some(s) => s.scheduler.progress(),
            None => Progress { percent: 0.0, thrown: 0, target: 0, complete: false },
        }
    }

    /// Final result once finished, live cumulative estimate before that
    pub fn estimate(&self) -> Option<Estimate> {
        let s = self.session.as_ref()?;
        if let Some(done) = s.final_estimate {
            return Some(done);
        }
        (s.tally.total_thrown > 0)
            .then(|| s.tally.cumulative_estimate(s.params.needle_length, s.params.line_spacing))
    }

    pub fn final_estimate(&self) -> Option<Estimate> {
        self.session.as_ref().and_then(|s| s.final_estimate)
    }

    /// Text for the results panel; empty before anything has settled
    pub fn result_text(&self) -> String {
        self.estimate().map(|e| e.to_string()).unwrap_or_default()
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            state: self.state(),
            frame: self.frame,
            progress: self.progress(),
            tally: self.tally(),
            removed: self.removed_count(),
            live_needles: self.live_needle_count(),
            estimate: self.estimate(),
            result_text: self.result_text(),
        }
    }

    pub fn report_json(&self) -> String {
        serde_json::to_string(&self.report()).unwrap_or_else(|_| "{}".to_string())
    }

    // === RENDER BUFFERS ===

    pub fn lines(&self) -> &[LineSegment] {
        &self.line_segments
    }

    pub fn instances(&self) -> &[f32] {
        &self.render.instances
    }

    pub fn line_buffer(&self) -> &[f32] {
        &self.render.lines
    }

    /// Get pointer to needle instance array (for JS rendering)
    pub fn instances_ptr(&self) -> *const f32 {
        self.render.instances.as_ptr()
    }

    /// Get instance array length in floats
    pub fn instances_len(&self) -> usize {
        self.render.instances.len()
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.render.lines.as_ptr()
    }

    pub fn lines_len(&self) -> usize {
        self.render.lines.len()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

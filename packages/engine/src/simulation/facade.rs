use std::fmt::Debug;

use wasm_bindgen::prelude::*;

use crate::domain::error::SimError;
use crate::domain::params::{SimulationConfig, SimulationParams};

use super::drive::{DriveLoop, DriveState, FrameHandle, FrameScheduler};
use super::perf_stats::PerfStats;
use super::{SimulationCore, SimulationState};

/// Books `requestAnimationFrame` callbacks for a host-supplied function.
pub struct JsFrameScheduler {
    callback: js_sys::Function,
}

impl JsFrameScheduler {
    pub fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }
}

impl FrameScheduler for JsFrameScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let window = web_sys::window()?;
        match window.request_animation_frame(&self.callback) {
            Ok(id) => Some(id),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(window) = web_sys::window() {
            warn_on_failure("cancelAnimationFrame", window.cancel_animation_frame(handle));
        }
    }
}

/// Fresh seed per page load unless the config pins one
fn seeded(mut config: SimulationConfig) -> SimulationConfig {
    if config.seed.is_none() {
        config.seed = Some((js_sys::Math::random() * u32::MAX as f64) as u64);
    }
    config
}

/// Log a failed browser call. Returns true if it succeeded.
fn warn_on_failure<E: Debug>(what: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("{what} failed: {e:?}");
            false
        }
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        warn_on_failure("alert", window.alert_with_message(message));
    }
}

/// Every rejected input goes through here: one alert, one error value.
fn reject(err: SimError) -> JsValue {
    let message = err.to_string();
    alert(&message);
    JsValue::from_str(&message)
}

#[wasm_bindgen]
pub struct Simulation {
    drive: DriveLoop<JsFrameScheduler>,
}

#[wasm_bindgen]
impl Simulation {
    /// `on_frame` is handed to `requestAnimationFrame`; it should call `tick`
    /// and then draw from the instance/line buffers.
    #[wasm_bindgen(constructor)]
    pub fn new(on_frame: js_sys::Function, aspect: f32) -> Self {
        let core = SimulationCore::new(seeded(SimulationConfig::default()), aspect);
        Self {
            drive: DriveLoop::new(core, JsFrameScheduler::new(on_frame)),
        }
    }

    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(on_frame: js_sys::Function, aspect: f32, config_json: String) -> Result<Simulation, JsValue> {
        let config = SimulationConfig::from_json(&config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let core = SimulationCore::new(seeded(config), aspect);
        Ok(Self {
            drive: DriveLoop::new(core, JsFrameScheduler::new(on_frame)),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.drive.core().frame() }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool { self.drive.state() == DriveState::Running }

    #[wasm_bindgen(getter)]
    pub fn finished(&self) -> bool { self.drive.core().state() == SimulationState::Finished }

    // === RUN CONTROL ===

    /// Reset and start a run. Invalid input shows an alert and is rejected;
    /// the current run keeps going.
    pub fn start(&mut self, needle_length: f32, line_spacing: f32, needle_count: u32, spread_radius: f32) -> Result<(), JsValue> {
        let params = SimulationParams::new(needle_length, line_spacing, needle_count, spread_radius);
        self.drive.start(params).map_err(reject)
    }

    /// Same as `start`, from `{"needleLength":..,"lineSpacing":..,"needleCount":..}`
    pub fn start_json(&mut self, json: String) -> Result<(), JsValue> {
        self.drive.start_json(&json).map_err(reject)
    }

    /// Frame callback body. Returns true while more frames are booked.
    pub fn tick(&mut self) -> bool {
        self.drive.tick();
        self.drive.state() == DriveState::Running
    }

    /// Stop scheduling and drop every needle
    pub fn reset(&mut self) {
        self.drive.reset();
    }

    pub fn zoom(&mut self, delta_y: f32) {
        self.drive.core_mut().zoom(delta_y);
    }

    pub fn resize(&mut self, aspect: f32) {
        self.drive.core_mut().resize(aspect);
    }

    // === SETTINGS ===

    pub fn set_stillness_threshold(&mut self, threshold: f32) {
        self.drive.core_mut().set_stillness_threshold(threshold);
    }

    /// Applies from the next start
    pub fn set_batch_size(&mut self, batch_size: u32) {
        self.drive.core_mut().set_batch_size(batch_size);
    }

    pub fn set_timestep(&mut self, timestep: f32) {
        self.drive.core_mut().set_timestep(timestep);
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.drive.core_mut().set_seed(seed);
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.drive.core_mut().enable_perf_metrics(enabled);
    }

    /// Get last tick perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.drive.core().get_perf_stats()
    }

    // === RESULTS ===

    /// Results panel text; empty until a needle has settled
    pub fn result_text(&self) -> String {
        self.drive.core().result_text()
    }

    pub fn progress_percent(&self) -> f32 {
        self.drive.core().progress().percent
    }

    /// "thrown/target"
    pub fn progress_label(&self) -> String {
        self.drive.core().progress().label()
    }

    pub fn total_hits(&self) -> u32 {
        self.drive.core().tally().total_hits
    }

    pub fn total_thrown(&self) -> u32 {
        self.drive.core().tally().total_thrown
    }

    pub fn report_json(&self) -> String {
        self.drive.core().report_json()
    }

    // === CAMERA ===

    pub fn camera_height(&self) -> f32 {
        self.drive.core().camera().height
    }

    pub fn camera_fov(&self) -> f32 {
        self.drive.core().camera().fov_deg
    }

    pub fn camera_aspect(&self) -> f32 {
        self.drive.core().camera().aspect
    }

    // === RENDER BUFFERS ===

    /// Get pointer to needle instances (8 floats each: pos xyz, quat xyzw, color)
    pub fn instances_ptr(&self) -> *const f32 {
        self.drive.core().instances_ptr()
    }

    /// Instance buffer length in floats
    pub fn instances_len(&self) -> usize {
        self.drive.core().instances_len()
    }

    /// Get pointer to ruling lines (3 floats each: x, z_min, z_max)
    pub fn lines_ptr(&self) -> *const f32 {
        self.drive.core().lines_ptr()
    }

    pub fn lines_len(&self) -> usize {
        self.drive.core().lines_len()
    }
}

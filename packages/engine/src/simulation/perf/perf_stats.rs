use wasm_bindgen::prelude::*;

/// Timings and counters for the last tick
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) physics_ms: f64,
    pub(super) detect_ms: f64,
    pub(super) extract_ms: f64,
    /// Bodies the backend still simulates
    pub(super) live_bodies: u32,
    /// Needles that settled and were classified this tick
    pub(super) resolved_this_tick: u32,
    /// Needles dropped after settling clear of every line
    pub(super) pruned: u32,
    pub(super) frame: u64,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn physics_ms(&self) -> f64 { self.physics_ms }
    #[wasm_bindgen(getter)]
    pub fn detect_ms(&self) -> f64 { self.detect_ms }
    #[wasm_bindgen(getter)]
    pub fn extract_ms(&self) -> f64 { self.extract_ms }
    #[wasm_bindgen(getter)]
    pub fn live_bodies(&self) -> u32 { self.live_bodies }
    #[wasm_bindgen(getter)]
    pub fn resolved_this_tick(&self) -> u32 { self.resolved_this_tick }
    #[wasm_bindgen(getter)]
    pub fn pruned(&self) -> u32 { self.pruned }
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.frame }
}

//! Buffon Engine - Buffon's needle, dropped for real, in WASM
//!
//! Needles fall as rigid bodies onto a ruled floor. Once a needle settles
//! it is classified against the lines; the crossing ratio gives pi.
//!
//! Architecture:
//! - core/        - Logging backend
//! - domain/      - Params, needle state, errors
//! - systems/     - Physics backend, rest detection, crossing, estimator
//! - simulation/  - Orchestration, frame scheduling, JS facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

// Compatibility re-exports (keeps short internal/external paths working)
pub use systems::batch;
pub use systems::camera;
pub use systems::crossing;
pub use systems::estimator;
pub use systems::line_field;
pub use systems::needle_factory;
pub use systems::physics_backend;
pub use systems::rest_detector;
pub use systems::rigid_body;
pub use systems::rigid_body_system;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::init_logging();
    log::info!("Buffon engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::error::SimError;
pub use domain::params::{SimulationConfig, SimulationParams};
pub use estimator::{Estimate, Tally};
pub use simulation::{DriveLoop, DriveState, FrameHandle, FrameScheduler, PerfStats, RunReport, Simulation, SimulationCore, SimulationState};

/// Stillness threshold, exposed so the UI can show the default
#[wasm_bindgen]
pub fn default_stillness_threshold() -> f32 { domain::params::STILLNESS_THRESHOLD }
#[wasm_bindgen]
pub fn default_batch_size() -> u32 { domain::params::BATCH_SIZE }
#[wasm_bindgen]
pub fn instance_stride() -> usize { simulation::INSTANCE_STRIDE }
#[wasm_bindgen]
pub fn line_stride() -> usize { simulation::LINE_STRIDE }

// Export render colors for JS (0xRRGGBB)
#[wasm_bindgen]
pub fn color_unresolved() -> u32 { domain::needle::COLOR_UNRESOLVED }
#[wasm_bindgen]
pub fn color_hit() -> u32 { domain::needle::COLOR_HIT }
#[wasm_bindgen]
pub fn color_line() -> u32 { domain::needle::COLOR_LINE }

/// Height of the ruling above the floor (world units)
#[wasm_bindgen]
pub fn line_height() -> f32 { line_field::LINE_HEIGHT }
/// Most ruling lines the line buffer will ever hold
#[wasm_bindgen]
pub fn max_lines() -> usize { line_field::MAX_LINES }

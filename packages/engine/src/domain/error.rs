//! Error types for the needle simulation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("needle length L ({length}) must not exceed line spacing d ({spacing})")]
    NeedleLongerThanSpacing { length: f32, spacing: f32 },

    #[error("needle length must be a positive finite number, got {0}")]
    InvalidLength(f32),

    #[error("line spacing must be a positive finite number, got {0}")]
    InvalidSpacing(f32),

    #[error("needle count must be at least 1")]
    InvalidNeedleCount,

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

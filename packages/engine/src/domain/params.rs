use serde::{Deserialize, Serialize};

use super::error::{Result, SimError};

/// Drop-zone half width used when the requested spread radius is unusable.
pub const DEFAULT_SPREAD_RADIUS: f32 = 5.0;

/// Needles released per wave.
pub const BATCH_SIZE: u32 = 100;

/// Linear speed under which a needle counts as settled.
pub const STILLNESS_THRESHOLD: f32 = 0.1;

pub const TIMESTEP: f32 = 1.0 / 60.0;

pub const GRAVITY: f32 = -9.82;

/// User-facing inputs for one run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    /// Needle length L
    pub needle_length: f32,
    /// Distance d between ruling lines
    pub line_spacing: f32,
    /// Total needles N to throw
    pub needle_count: u32,
    /// Drop-zone half width R
    #[serde(default = "default_spread_radius")]
    pub spread_radius: f32,
}

fn default_spread_radius() -> f32 {
    DEFAULT_SPREAD_RADIUS
}

impl SimulationParams {
    pub fn new(needle_length: f32, line_spacing: f32, needle_count: u32, spread_radius: f32) -> Self {
        Self {
            needle_length,
            line_spacing,
            needle_count,
            spread_radius,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the inputs and substitute the default spread radius if needed.
    ///
    /// `L > d` is rejected: the Buffon formula only holds for short needles.
    pub fn validated(self) -> Result<Self> {
        let length = self.needle_length;
        let spacing = self.line_spacing;

        if !length.is_finite() || length <= 0.0 {
            return Err(SimError::InvalidLength(length));
        }
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(SimError::InvalidSpacing(spacing));
        }
        if length > spacing {
            return Err(SimError::NeedleLongerThanSpacing { length, spacing });
        }
        if self.needle_count == 0 {
            return Err(SimError::InvalidNeedleCount);
        }

        let spread_radius = if self.spread_radius.is_finite() && self.spread_radius > 0.0 {
            self.spread_radius
        } else {
            DEFAULT_SPREAD_RADIUS
        };

        Ok(Self { spread_radius, ..self })
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::new(1.0, 1.0, 100, DEFAULT_SPREAD_RADIUS)
    }
}

/// Engine tuning knobs. Every field has a default so partial JSON is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    pub timestep: f32,
    pub stillness_threshold: f32,
    pub batch_size: u32,
    pub gravity: f32,
    /// Fixed RNG seed; `None` lets the host pick one
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: TIMESTEP,
            stillness_threshold: STILLNESS_THRESHOLD,
            batch_size: BATCH_SIZE,
            gravity: GRAVITY,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_needle_longer_than_spacing() {
        let err = SimulationParams::new(2.0, 1.0, 10, 5.0).validated().unwrap_err();
        assert!(matches!(err, SimError::NeedleLongerThanSpacing { .. }));
    }

    #[test]
    fn accepts_needle_equal_to_spacing() {
        let p = SimulationParams::new(1.0, 1.0, 10, 5.0).validated().unwrap();
        assert_eq!(p.needle_length, 1.0);
    }

    #[test]
    fn bad_spread_radius_falls_back_to_default() {
        for r in [0.0, -3.0, f32::NAN, f32::INFINITY] {
            let p = SimulationParams::new(1.0, 2.0, 10, r).validated().unwrap();
            assert_eq!(p.spread_radius, DEFAULT_SPREAD_RADIUS);
        }
        let p = SimulationParams::new(1.0, 2.0, 10, 8.0).validated().unwrap();
        assert_eq!(p.spread_radius, 8.0);
    }

    #[test]
    fn rejects_degenerate_inputs() {
        assert!(matches!(
            SimulationParams::new(f32::NAN, 1.0, 10, 5.0).validated(),
            Err(SimError::InvalidLength(_))
        ));
        assert!(matches!(
            SimulationParams::new(0.5, 0.0, 10, 5.0).validated(),
            Err(SimError::InvalidSpacing(_))
        ));
        assert!(matches!(
            SimulationParams::new(0.5, 1.0, 0, 5.0).validated(),
            Err(SimError::InvalidNeedleCount)
        ));
    }

    #[test]
    fn params_parse_from_camel_case_json() {
        let p = SimulationParams::from_json(
            r#"{"needleLength":1.0,"lineSpacing":2.0,"needleCount":500}"#,
        )
        .unwrap();
        assert_eq!(p.line_spacing, 2.0);
        assert_eq!(p.needle_count, 500);
        assert_eq!(p.spread_radius, DEFAULT_SPREAD_RADIUS);

        assert!(matches!(
            SimulationParams::from_json("{"),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let c = SimulationConfig::from_json(r#"{"batchSize":25,"seed":7}"#).unwrap();
        assert_eq!(c.batch_size, 25);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.stillness_threshold, STILLNESS_THRESHOLD);
        assert_eq!(c.timestep, TIMESTEP);
    }
}

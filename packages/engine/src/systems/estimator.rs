//! Buffon's estimator: with needle length `L <= d`, the crossing probability
//! is `2L / (pi d)`, so `pi ~ 2 L thrown / (d hits)`.

use std::f64::consts::PI;
use std::fmt;

use serde::Serialize;

/// Shown instead of an estimate when nothing crossed
pub const NO_CROSSINGS_MESSAGE: &str = "no crossings, cannot estimate π";

/// `2 L thrown / (d hits)`, or `None` when there are no hits.
pub fn pi_estimate(length: f64, spacing: f64, thrown: u32, hits: u32) -> Option<f64> {
    if hits == 0 {
        return None;
    }
    Some((2.0 * length * thrown as f64) / (spacing * hits as f64))
}

/// Percent deviation from the true value
pub fn relative_error(estimate: f64) -> f64 {
    (estimate - PI).abs() / PI * 100.0
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Estimate {
    #[serde(rename_all = "camelCase")]
    Value {
        pi: f64,
        /// Percent
        relative_error: f64,
        hits: u32,
        thrown: u32,
    },
    NoCrossings {
        thrown: u32,
    },
}

impl Estimate {
    pub fn compute(length: f32, spacing: f32, thrown: u32, hits: u32) -> Self {
        match pi_estimate(length as f64, spacing as f64, thrown, hits) {
            Some(pi) => Estimate::Value {
                pi,
                relative_error: relative_error(pi),
                hits,
                thrown,
            },
            None => Estimate::NoCrossings { thrown },
        }
    }

    pub fn pi(&self) -> Option<f64> {
        match self {
            Estimate::Value { pi, .. } => Some(*pi),
            Estimate::NoCrossings { .. } => None,
        }
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimate::Value { pi, relative_error, hits, thrown } => write!(
                f,
                "π ≈ {pi:.5}\nrelative error ≈ {relative_error:.2}%\n(crossings {hits} / needles {thrown})"
            ),
            Estimate::NoCrossings { .. } => f.write_str(NO_CROSSINGS_MESSAGE),
        }
    }
}

/// Hit/throw counters for the current wave and the whole run.
///
/// "Thrown" here means resolved: a needle is counted once it has settled
/// and been classified, so an in-flight wave never skews the estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub batch_thrown: u32,
    pub batch_hits: u32,
    pub total_thrown: u32,
    pub total_hits: u32,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting a fresh wave; cumulative totals carry over.
    pub fn begin_batch(&mut self) {
        self.batch_thrown = 0;
        self.batch_hits = 0;
    }

    pub fn record(&mut self, hit: bool) {
        self.batch_thrown += 1;
        self.total_thrown += 1;
        if hit {
            self.batch_hits += 1;
            self.total_hits += 1;
        }
    }

    /// Estimate over the current wave only
    pub fn batch_estimate(&self, length: f32, spacing: f32) -> Estimate {
        Estimate::compute(length, spacing, self.batch_thrown, self.batch_hits)
    }

    /// Estimate over everything resolved this run
    pub fn cumulative_estimate(&self, length: f32, spacing: f32) -> Estimate {
        Estimate::compute(length, spacing, self.total_thrown, self.total_hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_matches_buffon() {
        let est = pi_estimate(1.0, 1.0, 1000, 637).unwrap();
        assert!((est - 2000.0 / 637.0).abs() < 1e-12);
        assert!((est - 3.139717).abs() < 1e-6);

        let err = relative_error(est);
        assert!((err - (est - PI).abs() / PI * 100.0).abs() < 1e-12);
        assert!((err - 0.0601).abs() < 1e-3);

        // L=1, d=2: p = 1/pi
        let est = pi_estimate(1.0, 2.0, 1000, 318).unwrap();
        assert!((est - 1000.0 / 318.0).abs() < 1e-12);
    }

    #[test]
    fn zero_hits_cannot_estimate() {
        assert_eq!(pi_estimate(1.0, 1.0, 50, 0), None);
        let e = Estimate::compute(1.0, 1.0, 50, 0);
        assert_eq!(e, Estimate::NoCrossings { thrown: 50 });
        assert_eq!(e.to_string(), NO_CROSSINGS_MESSAGE);
        assert!(e.pi().is_none());
    }

    #[test]
    fn result_text_shows_estimate_error_and_counts() {
        let e = Estimate::compute(1.0, 1.0, 1000, 637);
        let text = e.to_string();
        assert!(text.starts_with("π ≈ 3.13972\n"), "{text}");
        assert!(text.contains("relative error ≈ 0.06%"), "{text}");
        assert!(text.ends_with("(crossings 637 / needles 1000)"), "{text}");
    }

    #[test]
    fn tally_keeps_totals_across_batches() {
        let mut t = Tally::new();
        let mut last = (0, 0);
        for i in 0..30u32 {
            if i % 10 == 0 {
                t.begin_batch();
            }
            t.record(i % 3 == 0);
            assert!(t.total_hits <= t.total_thrown);
            assert!(t.total_thrown >= last.0 && t.total_hits >= last.1);
            last = (t.total_thrown, t.total_hits);
        }
        assert_eq!(t.total_thrown, 30);
        assert_eq!(t.total_hits, 10);
        assert_eq!(t.batch_thrown, 10);
        assert_eq!(t.batch_hits, 3);

        let batch = t.batch_estimate(1.0, 1.0).pi().unwrap();
        let total = t.cumulative_estimate(1.0, 1.0).pi().unwrap();
        assert!((batch - 20.0 / 3.0).abs() < 1e-9);
        assert!((total - 6.0).abs() < 1e-9);
    }

    #[test]
    fn estimate_serializes_with_a_kind_tag() {
        let json = serde_json::to_string(&Estimate::NoCrossings { thrown: 3 }).unwrap();
        assert_eq!(json, r#"{"kind":"noCrossings","thrown":3}"#);
    }
}

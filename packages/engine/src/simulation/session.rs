use crate::batch::BatchScheduler;
use crate::domain::needle::Needle;
use crate::domain::params::SimulationParams;
use crate::estimator::{Estimate, Tally};

/// State of one run. Built fresh on every start so nothing leaks
/// from the previous run.
pub(super) struct RunSession {
    pub(super) params: SimulationParams,
    /// Active needles: still settling, or settled across a line
    pub(super) needles: Vec<Needle>,
    pub(super) next_needle_id: u32,
    pub(super) scheduler: BatchScheduler,
    pub(super) tally: Tally,
    /// Needles pruned after settling clear of every line
    pub(super) removed: u32,
    /// Set once, on the tick the last needle settles
    pub(super) result_shown: bool,
    pub(super) final_estimate: Option<Estimate>,
}

impl RunSession {
    pub(super) fn new(params: SimulationParams, batch_size: u32) -> Self {
        Self {
            params,
            needles: Vec::with_capacity(batch_size.min(params.needle_count) as usize),
            next_needle_id: 1,
            scheduler: BatchScheduler::new(params.needle_count, batch_size),
            tally: Tally::new(),
            removed: 0,
            result_shown: false,
            final_estimate: None,
        }
    }

    /// True when no needle is still moving
    pub(super) fn wave_settled(&self) -> bool {
        self.needles.iter().all(Needle::stopped)
    }
}

//! Wave scheduling: needles are released `batch_size` at a time and the
//! next wave waits until every live needle has settled. This bounds the
//! number of bodies the physics step has to move.

use serde::Serialize;

/// One released wave
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Batch {
    /// 0-based wave number
    pub index: u32,
    pub count: u32,
}

/// Progress bar state
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Progress {
    /// 0..=100
    pub percent: f32,
    pub thrown: u32,
    pub target: u32,
    /// Everything released; the host switches the bar to its "done" look
    pub complete: bool,
}

impl Progress {
    /// `"thrown/target"`
    pub fn label(&self) -> String {
        format!("{}/{}", self.thrown, self.target)
    }
}

#[derive(Clone, Debug)]
pub struct BatchScheduler {
    target: u32,
    batch_size: u32,
    thrown: u32,
    invocations: u32,
}

impl BatchScheduler {
    pub fn new(target: u32, batch_size: u32) -> Self {
        Self {
            target,
            batch_size: batch_size.max(1),
            thrown: 0,
            invocations: 0,
        }
    }

    /// Needles released so far (never exceeds the target)
    pub fn thrown(&self) -> u32 {
        self.thrown
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    /// How many waves have been released
    pub fn invocations(&self) -> u32 {
        self.invocations
    }

    pub fn has_remaining(&self) -> bool {
        self.thrown < self.target
    }

    /// Release the next wave, or `None` once the target is reached.
    pub fn release(&mut self) -> Option<Batch> {
        if !self.has_remaining() {
            return None;
        }
        let count = self.batch_size.min(self.target - self.thrown);
        let batch = Batch { index: self.invocations, count };
        self.thrown += count;
        self.invocations += 1;
        Some(batch)
    }

    pub fn progress(&self) -> Progress {
        let percent = if self.target > 0 {
            self.thrown as f32 / self.target as f32 * 100.0
        } else {
            0.0
        };
        Progress {
            percent,
            thrown: self.thrown,
            target: self.target,
            complete: self.target > 0 && self.thrown >= self.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_goes_in_the_last_wave() {
        let mut sched = BatchScheduler::new(250, 100);
        let counts: Vec<u32> = std::iter::from_fn(|| sched.release()).map(|b| b.count).collect();
        assert_eq!(counts, vec![100, 100, 50]);
        assert_eq!(sched.invocations(), 3);
        assert_eq!(sched.thrown(), 250);
        assert!(sched.release().is_none());
        assert_eq!(sched.invocations(), 3);
    }

    #[test]
    fn progress_tracks_releases() {
        let mut sched = BatchScheduler::new(250, 100);
        assert_eq!(sched.progress().percent, 0.0);
        assert!(!sched.progress().complete);

        sched.release();
        let p = sched.progress();
        assert_eq!(p.percent, 40.0);
        assert_eq!(p.label(), "100/250");

        sched.release();
        sched.release();
        let p = sched.progress();
        assert_eq!(p.percent, 100.0);
        assert!(p.complete);
        assert_eq!(p.label(), "250/250");
    }

    #[test]
    fn small_runs_fit_in_one_wave() {
        let mut sched = BatchScheduler::new(7, 100);
        assert_eq!(sched.release(), Some(Batch { index: 0, count: 7 }));
        assert!(!sched.has_remaining());
    }

    #[test]
    fn zero_batch_size_still_makes_progress() {
        let mut sched = BatchScheduler::new(3, 0);
        assert_eq!(sched.release().map(|b| b.count), Some(1));
    }
}

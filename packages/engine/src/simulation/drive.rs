//! Frame scheduling shell around `SimulationCore::advance`.
//!
//! The loop keeps at most one frame request pending. `tick` is what the
//! host calls from its frame callback: it books the next frame first, then
//! advances, and cancels that booking again once the run has finished.
//! Starting a new run cancels whatever is pending before anything else.

use crate::domain::error::Result;
use crate::domain::params::SimulationParams;
use crate::physics_backend::PhysicsBackend;
use crate::rigid_body_system::RigidBodySystem;

use super::{SimulationCore, SimulationState};

/// Opaque id of a pending frame request (`requestAnimationFrame` id in the browser)
pub type FrameHandle = i32;

/// Whatever delivers frame callbacks to the host
pub trait FrameScheduler {
    /// Ask for one more callback. `None` means the request could not be made.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriveState {
    /// No frame pending
    Idle,
    /// A frame is booked and the next `tick` will advance the core
    Running,
}

pub struct DriveLoop<S: FrameScheduler, P: PhysicsBackend = RigidBodySystem> {
    core: SimulationCore<P>,
    scheduler: S,
    request_id: Option<FrameHandle>,
}

impl<S: FrameScheduler, P: PhysicsBackend> DriveLoop<S, P> {
    pub fn new(core: SimulationCore<P>, scheduler: S) -> Self {
        Self {
            core,
            scheduler,
            request_id: None,
        }
    }

    pub fn core(&self) -> &SimulationCore<P> {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut SimulationCore<P> {
        &mut self.core
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn state(&self) -> DriveState {
        if self.request_id.is_some() {
            DriveState::Running
        } else {
            DriveState::Idle
        }
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.request_id
    }

    /// Reset and start a new run. A rejected run changes nothing: the
    /// previous run (and its pending frame) keeps going.
    pub fn start(&mut self, params: SimulationParams) -> Result<()> {
        let params = params.validated()?;

        self.cancel();
        self.core.start(params)?;
        self.request_id = self.scheduler.request_frame();
        Ok(())
    }

    /// `start` from a JSON params object. Parse errors are rejected the
    /// same way as invalid values.
    pub fn start_json(&mut self, json: &str) -> Result<()> {
        let params = SimulationParams::from_json(json)?;
        self.start(params)
    }

    /// One frame callback. Does nothing unless a frame was booked.
    pub fn tick(&mut self) -> SimulationState {
        if self.request_id.take().is_none() {
            return self.core.state();
        }

        self.request_id = self.scheduler.request_frame();
        let state = self.core.advance();

        if state != SimulationState::Running {
            self.cancel();
        }
        state
    }

    /// Cancel the pending frame, if any. The run itself is left as is.
    pub fn cancel(&mut self) {
        if let Some(id) = self.request_id.take() {
            self.scheduler.cancel_frame(id);
        }
    }

    /// Cancel scheduling and drop the current run.
    pub fn reset(&mut self) {
        self.cancel();
        self.core.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::SimError;
    use crate::domain::params::SimulationConfig;

    /// Books frames without ever firing them; tests call `tick` by hand.
    #[derive(Default)]
    struct ManualScheduler {
        next: FrameHandle,
        pending: Vec<FrameHandle>,
        cancelled: Vec<FrameHandle>,
    }

    impl FrameScheduler for ManualScheduler {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            self.next += 1;
            self.pending.push(self.next);
            Some(self.next)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.pending.retain(|&h| h != handle);
            self.cancelled.push(handle);
        }
    }

    fn drive() -> DriveLoop<ManualScheduler> {
        let config = SimulationConfig { seed: Some(7), ..SimulationConfig::default() };
        DriveLoop::new(SimulationCore::new(config, 1.5), ManualScheduler::default())
    }

    #[test]
    fn tick_without_booking_is_a_no_op() {
        let mut d = drive();
        assert_eq!(d.tick(), SimulationState::Idle);
        assert_eq!(d.core().frame(), 0);
        assert!(d.scheduler().pending.is_empty());
    }

    #[test]
    fn start_books_exactly_one_frame() {
        let mut d = drive();
        d.start(SimulationParams::new(1.0, 2.0, 10, 5.0)).unwrap();
        assert_eq!(d.state(), DriveState::Running);
        assert_eq!(d.scheduler().pending, vec![1]);

        d.tick();
        assert_eq!(d.core().frame(), 1);
        assert_eq!(d.pending_frame(), Some(2));
    }

    #[test]
    fn restart_cancels_the_pending_frame() {
        let mut d = drive();
        d.start(SimulationParams::new(1.0, 2.0, 10, 5.0)).unwrap();
        d.tick();
        let pending = d.pending_frame().unwrap();

        d.start(SimulationParams::new(0.5, 1.0, 20, 5.0)).unwrap();
        assert_eq!(d.scheduler().cancelled, vec![pending]);
        assert_eq!(d.pending_frame(), Some(pending + 1));
        assert_eq!(d.core().frame(), 0);
        assert_eq!(d.core().progress().target, 20);
    }

    #[test]
    fn rejected_start_keeps_the_current_run() {
        let mut d = drive();
        d.start(SimulationParams::new(1.0, 2.0, 10, 5.0)).unwrap();
        d.tick();
        let pending = d.pending_frame();

        assert!(d.start(SimulationParams::new(3.0, 2.0, 10, 5.0)).is_err());
        assert_eq!(d.pending_frame(), pending);
        assert!(d.scheduler().cancelled.is_empty());
        assert_eq!(d.core().params().unwrap().needle_length, 1.0);
        assert_eq!(d.core().frame(), 1);
    }

    #[test]
    fn unparsable_json_is_rejected_like_bad_values() {
        let mut d = drive();
        d.start_json(r#"{"needleLength":1.0,"lineSpacing":2.0,"needleCount":10}"#).unwrap();
        d.tick();
        let pending = d.pending_frame();

        assert!(matches!(d.start_json("{not json"), Err(SimError::Config(_))));
        assert!(matches!(
            d.start_json(r#"{"needleLength":3.0,"lineSpacing":2.0,"needleCount":10}"#),
            Err(SimError::NeedleLongerThanSpacing { .. })
        ));
        assert_eq!(d.pending_frame(), pending);
        assert!(d.scheduler().cancelled.is_empty());
        assert_eq!(d.core().frame(), 1);
    }

    #[test]
    fn reset_stops_scheduling_and_clears() {
        let mut d = drive();
        d.start(SimulationParams::new(1.0, 2.0, 10, 5.0)).unwrap();
        d.reset();
        assert_eq!(d.state(), DriveState::Idle);
        assert!(d.scheduler().pending.is_empty());
        assert_eq!(d.core().state(), SimulationState::Idle);
        assert_eq!(d.core().physics().body_count(), 0);
    }
}

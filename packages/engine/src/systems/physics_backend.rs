//! Seam between the simulation protocol and whatever integrates the bodies.
//!
//! The drive loop only needs to spawn bodies, advance time, read poses back
//! and drop bodies it is done with. `RigidBodySystem` is the built-in
//! implementation; tests plug in scripted backends.

use glam::{Quat, Vec3};

use crate::rigid_body::NeedleBodyDesc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u32);

/// Position and orientation of a body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

pub trait PhysicsBackend {
    fn add_body(&mut self, desc: NeedleBodyDesc) -> BodyHandle;

    /// Returns false if the handle was unknown.
    fn remove_body(&mut self, handle: BodyHandle) -> bool;

    fn step(&mut self, dt: f32);

    fn pose(&self, handle: BodyHandle) -> Option<Pose>;

    fn velocity(&self, handle: BodyHandle) -> Option<Vec3>;

    fn body_count(&self) -> usize;

    /// Remove all bodies.
    fn clear(&mut self);

    fn speed(&self, handle: BodyHandle) -> Option<f32> {
        self.velocity(handle).map(|v| v.length())
    }
}

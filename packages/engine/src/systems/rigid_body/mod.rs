//! RigidNeedle - A capsule-shaped body that moves as a unit
//!
//! The body stores its shape in local coordinates (long axis along +Y,
//! centered at 0,0,0) and transforms them to world coordinates using
//! position and orientation.

mod shape;
mod body;

pub use shape::{Capsule, CollisionFilter, Floor, GROUP_FLOOR, GROUP_NEEDLE};
pub use body::{NeedleBodyDesc, RigidNeedle};

//! RigidBodySystem - Minimal rigid needles on a floor plane
//!
//! This is intentionally simple (no broad phase, no needle-needle contacts).
//! Goals:
//! - Let dropped needles tumble, land and come to rest believably.
//! - Keep bodies stable and deterministic for a given seed.
//! - Stay cheap enough to step a few thousand needles per frame.
//!
//! Current behavior:
//! - Gravity + per-second damping, semi-implicit Euler.
//! - End caps are the only contact features (a straight capsule never
//!   touches a plane anywhere else first).
//! - Sequential impulses with friction against the floor, speculative
//!   contacts to avoid tunneling, positional projection out of the floor.

mod collision;
mod system;

pub use system::RigidBodySystem;

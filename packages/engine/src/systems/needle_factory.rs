//! Randomized needle spawning.
//!
//! Orientation comes from three independent uniform Euler angles. That is
//! not uniform over rotations, and since needles tend to land flat on their
//! spawn heading it biases the crossing rate upward.

use std::f32::consts::PI;

use glam::{EulerRot, Quat, Vec3};
use rand::Rng;

use crate::rigid_body::{Capsule, CollisionFilter, NeedleBodyDesc};

pub const NEEDLE_RADIUS: f32 = 0.02;
pub const NEEDLE_MASS: f32 = 0.1;
pub const LINEAR_DAMPING: f32 = 0.1;
pub const ANGULAR_DAMPING: f32 = 0.2;

/// Needles start somewhere in `[DROP_HEIGHT, DROP_HEIGHT + DROP_BAND)`
pub const DROP_HEIGHT: f32 = 5.0;
pub const DROP_BAND: f32 = 2.0;

/// Build the body for one needle of `length` dropped over `[-spread, spread]^2`.
///
/// `spread` must be positive; callers pass validated params.
pub fn create_needle<R: Rng + ?Sized>(rng: &mut R, length: f32, spread: f32) -> NeedleBodyDesc {
    let position = Vec3::new(
        rng.gen_range(-spread..=spread),
        DROP_HEIGHT + rng.gen_range(0.0..DROP_BAND),
        rng.gen_range(-spread..=spread),
    );

    let orientation = Quat::from_euler(
        EulerRot::XYZ,
        rng.gen_range(0.0..PI),
        rng.gen_range(0.0..PI),
        rng.gen_range(0.0..PI),
    );

    // Horizontal drift only; gravity does the rest.
    let velocity = Vec3::new(rng.gen_range(-1.0..1.0), 0.0, rng.gen_range(-1.0..1.0));

    NeedleBodyDesc {
        shape: Capsule::new(length, NEEDLE_RADIUS),
        mass: NEEDLE_MASS,
        position,
        orientation,
        velocity,
        linear_damping: LINEAR_DAMPING,
        angular_damping: ANGULAR_DAMPING,
        filter: CollisionFilter::NEEDLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn needles_spawn_inside_the_drop_zone() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..1000 {
            let d = create_needle(&mut rng, 1.0, 5.0);
            assert!(d.position.x.abs() <= 5.0);
            assert!(d.position.z.abs() <= 5.0);
            assert!(d.position.y >= DROP_HEIGHT && d.position.y < DROP_HEIGHT + DROP_BAND);
            assert_eq!(d.velocity.y, 0.0);
            assert!(d.velocity.x.abs() <= 1.0 && d.velocity.z.abs() <= 1.0);
            assert!((d.orientation.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn shape_matches_requested_length() {
        let mut rng = SmallRng::seed_from_u64(1);
        let d = create_needle(&mut rng, 0.75, 3.0);
        assert!((d.shape.length() - 0.75).abs() < 1e-6);
        assert_eq!(d.shape.radius, NEEDLE_RADIUS);
        assert_eq!(d.filter, CollisionFilter::NEEDLE);
        assert_eq!(d.mass, NEEDLE_MASS);
    }

    #[test]
    fn same_seed_same_needles() {
        let mut a = SmallRng::seed_from_u64(9);
        let mut b = SmallRng::seed_from_u64(9);
        for _ in 0..10 {
            assert_eq!(create_needle(&mut a, 1.0, 5.0), create_needle(&mut b, 1.0, 5.0));
        }
    }
}

//! Line-crossing test from a settled needle's pose.
//!
//! Lines sit at every integer multiple of the spacing `d`. Each endpoint
//! lands in cell `floor(x / d)`; the needle crosses iff its two endpoints
//! land in different cells. An endpoint exactly on a line belongs to the
//! cell that starts at that line.

use glam::Vec3;

use crate::physics_backend::Pose;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossing {
    Crossed,
    Clear,
}

impl Crossing {
    #[inline]
    pub fn is_hit(self) -> bool {
        matches!(self, Crossing::Crossed)
    }
}

/// World-space endpoints of a needle of `length` whose long axis is local Y
pub fn endpoints(pose: &Pose, length: f32) -> (Vec3, Vec3) {
    let half = pose.orientation * Vec3::new(0.0, length * 0.5, 0.0);
    (pose.position + half, pose.position - half)
}

/// Index of the strip between two ruling lines that contains `x`
#[inline]
pub fn cell_index(x: f32, spacing: f32) -> i64 {
    (x / spacing).floor() as i64
}

#[inline]
pub fn crosses(x1: f32, x2: f32, spacing: f32) -> bool {
    cell_index(x1, spacing) != cell_index(x2, spacing)
}

pub fn classify(pose: &Pose, length: f32, spacing: f32) -> Crossing {
    let (p1, p2) = endpoints(pose, length);
    if crosses(p1.x, p2.x, spacing) {
        Crossing::Crossed
    } else {
        Crossing::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use std::f32::consts::FRAC_PI_2;

    fn pose(x: f32, orientation: Quat) -> Pose {
        Pose {
            position: Vec3::new(x, 0.02, 0.3),
            orientation,
        }
    }

    /// Lying flat along +x
    fn along_x() -> Quat {
        Quat::from_rotation_z(-FRAC_PI_2)
    }

    #[test]
    fn symmetric_under_endpoint_swap() {
        let cases = [(0.2, 0.9), (0.9, 1.1), (-0.3, 0.4), (-1.0, -1.0), (2.5, 1.5)];
        for (a, b) in cases {
            assert_eq!(crosses(a, b, 1.0), crosses(b, a, 1.0));
        }
    }

    #[test]
    fn invariant_under_whole_spacing_shifts() {
        let d = 2.0;
        let cases = [(0.5, 1.5), (1.5, 2.5), (-0.5, 0.5), (3.75, 3.25)];
        for (a, b) in cases {
            for k in -3..=3 {
                let shift = k as f32 * d;
                assert_eq!(crosses(a, b, d), crosses(a + shift, b + shift, d), "k={k} ({a},{b})");
            }
        }
    }

    #[test]
    fn axis_aligned_needle_across_a_line_crosses() {
        // Center on the line at x=1, ends at 0.5 and 1.5.
        let p = pose(1.0, along_x());
        let (p1, p2) = endpoints(&p, 1.0);
        assert!((p1.x - 1.5).abs() < 1e-5);
        assert!((p2.x - 0.5).abs() < 1e-5);
        assert_eq!(classify(&p, 1.0, 1.0), Crossing::Crossed);
    }

    #[test]
    fn axis_aligned_needle_inside_one_strip_is_clear() {
        // d = 2, center at 1.0: ends at 0.5 and 1.5, both in cell 0.
        assert_eq!(classify(&pose(1.0, along_x()), 1.0, 2.0), Crossing::Clear);
    }

    #[test]
    fn endpoint_on_a_line_belongs_to_the_next_cell() {
        assert_eq!(cell_index(1.0, 1.0), 1);
        assert_eq!(cell_index(-0.0001, 1.0), -1);
        assert!(crosses(0.0, 1.0, 1.0));
        assert!(!crosses(0.0, 0.999, 1.0));
    }

    #[test]
    fn needle_parallel_to_lines_never_crosses() {
        // Long axis along z: both ends share x.
        let p = pose(0.999, Quat::from_rotation_x(FRAC_PI_2));
        assert_eq!(classify(&p, 1.0, 1.0), Crossing::Clear);
    }

    #[test]
    fn upright_needle_uses_its_center_cell() {
        let p = pose(-0.5, Quat::IDENTITY);
        assert_eq!(classify(&p, 1.0, 1.0), Crossing::Clear);
    }
}

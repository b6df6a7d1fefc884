use glam::Vec3;

/// Collision group bit for needles
pub const GROUP_NEEDLE: u32 = 1;
/// Collision group bit for the static floor
pub const GROUP_FLOOR: u32 = 2;

/// Group/mask pair. Two bodies interact only if each one's mask
/// contains the other's group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionFilter {
    pub group: u32,
    pub mask: u32,
}

impl CollisionFilter {
    /// Needles see the floor and nothing else.
    pub const NEEDLE: Self = Self { group: GROUP_NEEDLE, mask: GROUP_FLOOR };
    pub const FLOOR: Self = Self { group: GROUP_FLOOR, mask: GROUP_NEEDLE };

    #[inline]
    pub fn interacts(self, other: CollisionFilter) -> bool {
        (self.mask & other.group) != 0 && (other.mask & self.group) != 0
    }
}

/// Cylinder of `2 * half_length` along local Y, capped by two spheres
/// of the same radius centered on the cylinder ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    pub half_length: f32,
    pub radius: f32,
}

impl Capsule {
    pub fn new(length: f32, radius: f32) -> Self {
        Self {
            half_length: length * 0.5,
            radius,
        }
    }

    pub fn length(&self) -> f32 {
        self.half_length * 2.0
    }

    /// Centers of the two end caps in local space
    #[inline]
    pub fn local_ends(&self) -> [Vec3; 2] {
        [
            Vec3::new(0.0, self.half_length, 0.0),
            Vec3::new(0.0, -self.half_length, 0.0),
        ]
    }

    /// Principal moments of inertia (x, y, z) for a solid rod of this shape.
    /// Y is the long axis.
    pub fn inertia(&self, mass: f32) -> Vec3 {
        let len = self.length();
        let r2 = self.radius * self.radius;
        let perp = mass * (len * len / 12.0 + r2 / 4.0);
        let axial = mass * r2 * 0.5;
        Vec3::new(perp, axial, perp)
    }
}

/// Infinite static plane `y = height`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Floor {
    pub height: f32,
    pub filter: CollisionFilter,
}

impl Default for Floor {
    fn default() -> Self {
        Self {
            height: 0.0,
            filter: CollisionFilter::FLOOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needles_ignore_each_other_but_hit_the_floor() {
        assert!(!CollisionFilter::NEEDLE.interacts(CollisionFilter::NEEDLE));
        assert!(CollisionFilter::NEEDLE.interacts(CollisionFilter::FLOOR));
        assert!(CollisionFilter::FLOOR.interacts(CollisionFilter::NEEDLE));
    }

    #[test]
    fn rod_inertia_is_largest_across_the_long_axis() {
        let c = Capsule::new(1.0, 0.02);
        let i = c.inertia(0.1);
        assert!(i.x > i.y);
        assert_eq!(i.x, i.z);
        assert!((i.x - 0.1 * (1.0 / 12.0 + 0.0001)).abs() < 1e-6);
    }
}

use glam::{Mat3, Quat, Vec3};

use super::shape::{Capsule, CollisionFilter};

/// Smallest principal moment allowed; a 2cm rod has almost no axial inertia
const MIN_INERTIA: f32 = 1e-4;

/// Everything needed to spawn a needle body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeedleBodyDesc {
    pub shape: Capsule,
    pub mass: f32,
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub filter: CollisionFilter,
}

/// Rigid needle - moves as a single unit
pub struct RigidNeedle {
    // === Physics State ===
    /// World position (center of mass)
    pub pos: Vec3,
    /// Velocity (units per second)
    pub velocity: Vec3,
    pub orientation: Quat,
    /// Angular velocity (radians per second, world frame)
    pub angular_vel: Vec3,
    pub mass: f32,
    /// Inverse principal moments in body frame
    pub inv_inertia_local: Vec3,
    /// Is body active (simulated)?
    pub active: bool,
    pub id: u32,

    // === Shape Definition ===
    pub shape: Capsule,
    pub filter: CollisionFilter,

    // === Material properties ===
    /// Fraction of velocity lost per second
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Bounciness (0.0 = no bounce, 1.0 = full elastic)
    pub restitution: f32,
    pub friction: f32,
}

impl RigidNeedle {
    pub fn from_desc(desc: &NeedleBodyDesc, id: u32) -> Self {
        let inertia = desc.shape.inertia(desc.mass).max(Vec3::splat(MIN_INERTIA));

        Self {
            pos: desc.position,
            velocity: desc.velocity,
            orientation: desc.orientation.normalize(),
            angular_vel: Vec3::ZERO,
            mass: desc.mass,
            inv_inertia_local: inertia.recip(),
            active: true,
            id,
            shape: desc.shape,
            filter: desc.filter,
            linear_damping: desc.linear_damping,
            angular_damping: desc.angular_damping,
            restitution: 0.1,
            friction: 0.4,
        }
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        if self.mass > 0.0 { 1.0 / self.mass } else { 0.0 }
    }

    /// Inverse inertia tensor rotated into world space
    pub fn inv_inertia_world(&self) -> Mat3 {
        let r = Mat3::from_quat(self.orientation);
        r * Mat3::from_diagonal(self.inv_inertia_local) * r.transpose()
    }

    /// Transform a local point to world coordinates
    #[inline]
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        self.pos + self.orientation * local
    }

    /// World-space centers of the two end caps
    pub fn world_ends(&self) -> [Vec3; 2] {
        let [a, b] = self.shape.local_ends();
        [self.local_to_world(a), self.local_to_world(b)]
    }

    /// Unit vector along the long axis in world space
    #[inline]
    pub fn axis(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Velocity of a point at offset `r` from the center of mass
    #[inline]
    pub fn velocity_at(&self, r: Vec3) -> Vec3 {
        self.velocity + self.angular_vel.cross(r)
    }

    /// Apply an impulse at offset `r` from the center of mass
    pub fn apply_impulse_at(&mut self, impulse: Vec3, r: Vec3) {
        self.velocity += impulse * self.inv_mass();
        self.angular_vel += self.inv_inertia_world() * r.cross(impulse);
    }

    /// Inverse effective mass seen along `dir` at offset `r`
    pub fn effective_inv_mass(&self, r: Vec3, dir: Vec3) -> f32 {
        let rn = r.cross(dir);
        self.inv_mass() + dir.dot((self.inv_inertia_world() * rn).cross(r))
    }

    /// Frame-rate independent damping: `v *= (1 - damping)^dt`
    pub fn apply_damping(&mut self, dt: f32) {
        self.velocity *= (1.0 - self.linear_damping).clamp(0.0, 1.0).powf(dt);
        self.angular_vel *= (1.0 - self.angular_damping).clamp(0.0, 1.0).powf(dt);
    }

    /// Advance pose by one step using the current velocities
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.velocity * dt;

        let w = self.angular_vel;
        let spin = Quat::from_xyzw(w.x, w.y, w.z, 0.0) * self.orientation;
        self.orientation = (self.orientation + spin * (0.5 * dt)).normalize();
    }

    /// Lowest point of the capsule surface along world Y
    pub fn lowest_y(&self) -> f32 {
        let [a, b] = self.world_ends();
        a.y.min(b.y) - self.shape.radius
    }
}

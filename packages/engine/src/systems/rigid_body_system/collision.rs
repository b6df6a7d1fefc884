use glam::Vec3;

use crate::rigid_body::{Floor, RigidNeedle};

/// Solver passes over the (at most two) floor contacts
const CONTACT_ITERATIONS: usize = 6;
/// Contacts closer than this are kept even if slightly separated
const CONTACT_SLOP: f32 = 0.005;
/// Impacts slower than this do not bounce
const BOUNCE_THRESHOLD: f32 = 1.0;
/// Fraction of spin about the long axis removed per grounded step.
/// Needles are faceted, not round.
const ROLL_RESISTANCE: f32 = 0.5;

struct Contact {
    /// Contact point relative to the center of mass
    r: Vec3,
    /// Normal velocity the solver drives toward
    target_vn: f32,
    normal_impulse: f32,
    friction_impulse: Vec3,
}

/// Resolve floor contacts for one step. Returns true if the body touches
/// (or is about to touch) the floor.
pub(super) fn resolve_floor_contacts(body: &mut RigidNeedle, floor: &Floor, dt: f32) -> bool {
    let mut contacts: [Option<Contact>; 2] = [None, None];

    for (slot, end) in contacts.iter_mut().zip(body.world_ends()) {
        let point = end - Vec3::new(0.0, body.shape.radius, 0.0);
        let gap = point.y - floor.height;
        let r = point - body.pos;
        let vn = body.velocity_at(r).y;

        // Speculative: keep it if this step's motion would close the gap.
        if gap > CONTACT_SLOP && gap + vn * dt > 0.0 {
            continue;
        }

        let target_vn = if gap > 0.0 {
            -gap / dt
        } else if vn < -BOUNCE_THRESHOLD {
            -vn * body.restitution
        } else {
            0.0
        };

        *slot = Some(Contact {
            r,
            target_vn,
            normal_impulse: 0.0,
            friction_impulse: Vec3::ZERO,
        });
    }

    if contacts.iter().all(Option::is_none) {
        return false;
    }

    for _ in 0..CONTACT_ITERATIONS {
        for contact in contacts.iter_mut().flatten() {
            solve_normal(body, contact);
            solve_friction(body, contact);
        }
    }

    resist_rolling(body);
    true
}

fn solve_normal(body: &mut RigidNeedle, c: &mut Contact) {
    let vn = body.velocity_at(c.r).y;
    let k = body.effective_inv_mass(c.r, Vec3::Y);
    if k <= 0.0 {
        return;
    }

    // Accumulated impulse stays non-negative: the floor only pushes.
    let lambda = (c.target_vn - vn) / k;
    let accumulated = (c.normal_impulse + lambda).max(0.0);
    let delta = accumulated - c.normal_impulse;
    c.normal_impulse = accumulated;

    if delta != 0.0 {
        body.apply_impulse_at(Vec3::new(0.0, delta, 0.0), c.r);
    }
}

fn solve_friction(body: &mut RigidNeedle, c: &mut Contact) {
    let v = body.velocity_at(c.r);
    let tangential = Vec3::new(v.x, 0.0, v.z);
    let speed = tangential.length();
    if speed < 1e-6 {
        return;
    }

    let dir = tangential / speed;
    let k = body.effective_inv_mass(c.r, dir);
    if k <= 0.0 {
        return;
    }

    // Coulomb cone: |friction| <= mu * normal
    let max_friction = body.friction * c.normal_impulse;
    let mut accumulated = c.friction_impulse - dir * (speed / k);
    let len = accumulated.length();
    if len > max_friction {
        accumulated *= if len > 0.0 { max_friction / len } else { 0.0 };
    }
    let delta = accumulated - c.friction_impulse;
    c.friction_impulse = accumulated;

    body.apply_impulse_at(delta, c.r);
}

fn resist_rolling(body: &mut RigidNeedle) {
    let axis = body.axis();
    let spin = axis * body.angular_vel.dot(axis);
    body.angular_vel -= spin * ROLL_RESISTANCE;
}

/// Push the body straight up so no part of it sits below the floor.
pub(super) fn project_out_of_floor(body: &mut RigidNeedle, floor: &Floor) {
    let depth = floor.height - body.lowest_y();
    if depth > 0.0 {
        body.pos.y += depth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigid_body::{Capsule, CollisionFilter, NeedleBodyDesc};
    use glam::Quat;

    fn flat_needle(y: f32, velocity: Vec3) -> RigidNeedle {
        let desc = NeedleBodyDesc {
            shape: Capsule::new(1.0, 0.02),
            mass: 0.1,
            position: Vec3::new(0.0, y, 0.0),
            orientation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            velocity,
            linear_damping: 0.1,
            angular_damping: 0.2,
            filter: CollisionFilter::NEEDLE,
        };
        RigidNeedle::from_desc(&desc, 1)
    }

    #[test]
    fn far_above_floor_has_no_contacts() {
        let mut body = flat_needle(3.0, Vec3::new(0.0, -1.0, 0.0));
        assert!(!resolve_floor_contacts(&mut body, &Floor::default(), 1.0 / 60.0));
        assert_eq!(body.velocity.y, -1.0);
    }

    #[test]
    fn resting_needle_loses_downward_velocity() {
        let mut body = flat_needle(0.02, Vec3::new(0.0, -0.2, 0.0));
        assert!(resolve_floor_contacts(&mut body, &Floor::default(), 1.0 / 60.0));
        assert!(body.velocity.y.abs() < 1e-3);
        assert!(body.angular_vel.length() < 1e-2);
    }

    #[test]
    fn friction_slows_sliding() {
        let mut body = flat_needle(0.02, Vec3::new(1.0, -0.2, 0.0));
        resolve_floor_contacts(&mut body, &Floor::default(), 1.0 / 60.0);
        assert!(body.velocity.x < 1.0);
        assert!(body.velocity.x >= 0.0);
    }

    #[test]
    fn speculative_contact_stops_tunneling() {
        // Falls 0.5 in one step but is only 0.1 above the floor.
        let mut body = flat_needle(0.12, Vec3::new(0.0, -30.0, 0.0));
        let dt = 1.0 / 60.0;
        assert!(resolve_floor_contacts(&mut body, &Floor::default(), dt));
        body.integrate(dt);
        assert!(body.lowest_y() > -1e-3);
    }

    #[test]
    fn projection_lifts_sunken_body() {
        let mut body = flat_needle(-0.5, Vec3::ZERO);
        project_out_of_floor(&mut body, &Floor::default());
        assert!(body.lowest_y().abs() < 1e-5);
    }
}

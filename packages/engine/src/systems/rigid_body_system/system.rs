use std::collections::HashMap;

use glam::Vec3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::physics_backend::{BodyHandle, PhysicsBackend, Pose};
use crate::rigid_body::{Floor, NeedleBodyDesc, RigidNeedle};

use super::collision::{project_out_of_floor, resolve_floor_contacts};

/// Below this many bodies the rayon fan-out costs more than it saves.
#[cfg(feature = "parallel")]
const PARALLEL_MIN_BODIES: usize = 256;

/// Manages all needle bodies in the simulation
pub struct RigidBodySystem {
    bodies: Vec<RigidNeedle>,
    /// Body id -> index into `bodies`
    index: HashMap<u32, usize>,
    next_id: u32,
    gravity: Vec3,
    floor: Floor,
}

impl RigidBodySystem {
    pub fn new(gravity_y: f32) -> Self {
        Self {
            bodies: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
            gravity: Vec3::new(0.0, gravity_y, 0.0),
            floor: Floor::default(),
        }
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidNeedle> {
        self.index.get(&handle.0).map(|&i| &self.bodies[i])
    }
}

/// One integration step for a single body
fn step_body(body: &mut RigidNeedle, gravity: Vec3, floor: &Floor, dt: f32) {
    if !body.active {
        return;
    }

    body.velocity += gravity * dt;
    body.apply_damping(dt);

    let touches_floor = body.filter.interacts(floor.filter);
    if touches_floor {
        resolve_floor_contacts(body, floor, dt);
    }

    body.integrate(dt);

    if touches_floor {
        project_out_of_floor(body, floor);
    }
}

#[cfg(feature = "parallel")]
fn for_each_body<F>(bodies: &mut [RigidNeedle], f: F)
where
    F: Fn(&mut RigidNeedle) + Sync + Send,
{
    if bodies.len() >= PARALLEL_MIN_BODIES {
        bodies.par_iter_mut().for_each(f);
    } else {
        bodies.iter_mut().for_each(f);
    }
}

#[cfg(not(feature = "parallel"))]
fn for_each_body<F>(bodies: &mut [RigidNeedle], f: F)
where
    F: Fn(&mut RigidNeedle),
{
    bodies.iter_mut().for_each(f);
}

impl PhysicsBackend for RigidBodySystem {
    fn add_body(&mut self, desc: NeedleBodyDesc) -> BodyHandle {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);

        self.index.insert(id, self.bodies.len());
        self.bodies.push(RigidNeedle::from_desc(&desc, id));
        BodyHandle(id)
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        let Some(idx) = self.index.remove(&handle.0) else {
            return false;
        };
        self.bodies.swap_remove(idx);
        // The former last body now lives at `idx`.
        if let Some(moved) = self.bodies.get(idx) {
            self.index.insert(moved.id, idx);
        }
        true
    }

    /// Bodies never touch each other, so each one steps independently.
    fn step(&mut self, dt: f32) {
        let gravity = self.gravity;
        let floor = self.floor;
        for_each_body(&mut self.bodies, |body| step_body(body, gravity, &floor, dt));
    }

    fn pose(&self, handle: BodyHandle) -> Option<Pose> {
        self.body(handle).map(|b| Pose {
            position: b.pos,
            orientation: b.orientation,
        })
    }

    fn velocity(&self, handle: BodyHandle) -> Option<Vec3> {
        self.body(handle).map(|b| b.velocity)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn clear(&mut self) {
        self.bodies.clear();
        self.index.clear();
        self.next_id = 1;
    }
}

impl Default for RigidBodySystem {
    fn default() -> Self {
        Self::new(crate::domain::params::GRAVITY)
    }
}

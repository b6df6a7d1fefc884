use serde::Serialize;

use crate::systems::physics_backend::BodyHandle;

/// Gray: still falling or tumbling
pub const COLOR_UNRESOLVED: u32 = 0x888888;
/// Red: settled across a ruling line
pub const COLOR_HIT: u32 = 0xff0000;
pub const COLOR_LINE: u32 = 0x444444;

/// Where a needle is in its settle-and-classify lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NeedleStatus {
    Unresolved,
    Crossed,
    /// Classified as not crossing; body already removed, awaiting prune
    SettledNoCross,
    Removed,
}

impl NeedleStatus {
    /// Has the rest detector already fired for this needle?
    #[inline]
    pub fn is_stopped(self) -> bool {
        !matches!(self, NeedleStatus::Unresolved)
    }

    pub fn color(self) -> u32 {
        match self {
            NeedleStatus::Crossed => COLOR_HIT,
            _ => COLOR_UNRESOLVED,
        }
    }
}

/// A dropped needle. Pose and velocity live in the physics backend.
#[derive(Clone, Debug)]
pub struct Needle {
    pub id: u32,
    pub body: BodyHandle,
    pub status: NeedleStatus,
    /// Index of the wave this needle was released in
    pub batch: u32,
}

impl Needle {
    pub fn new(id: u32, body: BodyHandle, batch: u32) -> Self {
        Self {
            id,
            body,
            status: NeedleStatus::Unresolved,
            batch,
        }
    }

    #[inline]
    pub fn stopped(&self) -> bool {
        self.status.is_stopped()
    }
}

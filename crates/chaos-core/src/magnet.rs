use crate::constants::{CURSOR_MAGNET_SMOOTHING, MAGNET_RADIUS_PX, MAGNET_STRENGTH};
use crate::error::Result;
use crate::follower::{Follower, FollowerConfig};
use crate::host::Animate;
use glam::Vec2;

/// Offset that pulls an element centred at `center` toward `pointer`.
///
/// Zero outside `radius`; inside, a fixed fraction of the pointer's offset
/// from the centre.
#[inline]
pub fn magnet_offset(pointer: Vec2, center: Vec2, radius: f32, strength: f32) -> Vec2 {
    let delta = pointer - center;
    if radius <= 0.0 || delta.length_squared() > radius * radius {
        return Vec2::ZERO;
    }
    delta * strength
}

/// Magnetic hover: an element that leans toward a nearby pointer and eases
/// back to rest when the pointer leaves.
#[derive(Clone, Debug)]
pub struct Magnet {
    pub center: Vec2,
    pub radius: f32,
    pub strength: f32,
    offset: Follower<Vec2>,
}

impl Magnet {
    pub fn new(center: Vec2, radius: f32, strength: f32, config: FollowerConfig) -> Self {
        Self {
            center,
            radius,
            strength,
            offset: Follower::new(config),
        }
    }

    pub fn with_defaults(center: Vec2) -> Result<Self> {
        Ok(Self::new(
            center,
            MAGNET_RADIUS_PX,
            MAGNET_STRENGTH,
            FollowerConfig::per_frame(CURSOR_MAGNET_SMOOTHING)?,
        ))
    }

    /// Element moved or resized; the current offset keeps easing.
    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    /// Re-centre from a layout measurement taken while the element is
    /// displaced by the current offset (a bounding rect includes transforms).
    pub fn set_measured_center(&mut self, measured: Vec2) {
        self.center = measured - self.offset();
    }

    pub fn offset(&self) -> Vec2 {
        self.offset.current()
    }
}

impl Animate for Magnet {
    type Input = Vec2;
    type Output = Vec2;

    fn set_target(&mut self, pointer: Vec2) {
        let pull = magnet_offset(pointer, self.center, self.radius, self.strength);
        self.offset.set_target(pull);
    }

    fn advance(&mut self, dt_sec: f32) -> Option<Vec2> {
        self.offset.tick_elapsed(dt_sec)
    }
}

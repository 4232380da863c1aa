//! Axis-aligned bodies for arcade physics
//!
//! Positions are body centers in world pixels, y pointing down.

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap; touching edges do not count
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Penetration depth on each axis (only meaningful when intersecting)
    pub fn overlap(&self, other: &Aabb) -> Vec2 {
        Vec2::new(
            (self.max.x - other.min.x).min(other.max.x - self.min.x),
            (self.max.y - other.min.y).min(other.max.y - self.min.y),
        )
    }
}

/// A dynamic physics body
#[derive(Debug, Clone)]
pub struct Body {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Fraction of velocity kept (and reversed) on impact, per axis
    pub bounce: Vec2,
    pub allow_gravity: bool,
    /// Clamp to the world rectangle
    pub collide_world_bounds: bool,
    /// Disabled bodies are neither integrated nor tested
    pub enabled: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            bounce: Vec2::ZERO,
            allow_gravity: true,
            collide_world_bounds: false,
            enabled: true,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = Vec2::splat(bounce);
        self
    }

    pub fn with_world_bounds(mut self) -> Self {
        self.collide_world_bounds = true;
        self
    }

    /// Re-enable at a new position with zero velocity
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.vel = Vec2::ZERO;
    }

    /// Whether both bodies are enabled and overlapping
    pub fn touches(&self, other: &Body) -> bool {
        self.enabled && other.enabled && self.aabb().intersects(&other.aabb())
    }
}

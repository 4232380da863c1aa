//! Minimal arcade physics
//!
//! Just enough for a single-screen platformer: constant gravity, explicit
//! Euler integration, world-rectangle clamping, and separation of dynamic
//! bodies from immovable platforms. Group pairings are registered once at
//! scene creation and processed in registration order every step.

use glam::Vec2;

use super::body::{Aabb, Body};

/// Group pairs the scene registers with the world.
///
/// The three platform pairings separate the body from the platform. The two
/// player pairings only fire their callback; the player never pushes against
/// a star or a hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    PlayerPlatforms,
    StarsPlatforms,
    BombsPlatforms,
    /// Triggers the collect callback
    PlayerStars,
    /// Triggers the game-over callback
    PlayerBombs,
}

/// Physics world settings and registrations
#[derive(Debug, Clone)]
pub struct ArcadeWorld {
    pub gravity: Vec2,
    pub bounds: Aabb,
    /// Paused worlds neither integrate nor fire callbacks
    pub paused: bool,
    interactions: Vec<Interaction>,
}

impl ArcadeWorld {
    pub fn new(gravity: Vec2, size: Vec2) -> Self {
        Self {
            gravity,
            bounds: Aabb::new(Vec2::ZERO, size),
            paused: false,
            interactions: Vec::new(),
        }
    }

    /// Register a group pairing; duplicates are ignored
    pub fn register(&mut self, interaction: Interaction) {
        if !self.interactions.contains(&interaction) {
            self.interactions.push(interaction);
        }
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Apply gravity and velocity, then clamp to the world if requested
    pub fn integrate(&self, body: &mut Body, dt: f32) {
        if !body.enabled {
            return;
        }
        if body.allow_gravity {
            body.vel += self.gravity * dt;
        }
        body.pos += body.vel * dt;
        if body.collide_world_bounds {
            self.clamp_to_bounds(body);
        }
    }

    /// Push the body back inside the world, reflecting velocity by its bounce.
    /// Returns true if any edge was hit.
    pub fn clamp_to_bounds(&self, body: &mut Body) -> bool {
        let half = body.size * 0.5;
        let mut hit = false;

        if body.pos.x - half.x < self.bounds.min.x {
            body.pos.x = self.bounds.min.x + half.x;
            if body.vel.x < 0.0 {
                body.vel.x = -body.vel.x * body.bounce.x;
            }
            hit = true;
        } else if body.pos.x + half.x > self.bounds.max.x {
            body.pos.x = self.bounds.max.x - half.x;
            if body.vel.x > 0.0 {
                body.vel.x = -body.vel.x * body.bounce.x;
            }
            hit = true;
        }

        if body.pos.y - half.y < self.bounds.min.y {
            body.pos.y = self.bounds.min.y + half.y;
            if body.vel.y < 0.0 {
                body.vel.y = -body.vel.y * body.bounce.y;
            }
            hit = true;
        } else if body.pos.y + half.y > self.bounds.max.y {
            body.pos.y = self.bounds.max.y - half.y;
            if body.vel.y > 0.0 {
                body.vel.y = -body.vel.y * body.bounce.y;
            }
            hit = true;
        }

        hit
    }
}

/// Separate a dynamic body from an immovable box along the axis of least
/// penetration. Velocity into the box is reflected and scaled by bounce.
/// Returns true if the bodies were overlapping.
pub fn separate_from_static(body: &mut Body, wall: &Aabb) -> bool {
    if !body.enabled {
        return false;
    }
    let aabb = body.aabb();
    if !aabb.intersects(wall) {
        return false;
    }

    let depth = aabb.overlap(wall);
    let wall_center = wall.center();

    if depth.y <= depth.x {
        if body.pos.y < wall_center.y {
            // Landed on top
            body.pos.y -= depth.y;
            if body.vel.y > 0.0 {
                body.vel.y = -body.vel.y * body.bounce.y;
            }
        } else {
            // Bumped from below
            body.pos.y += depth.y;
            if body.vel.y < 0.0 {
                body.vel.y = -body.vel.y * body.bounce.y;
            }
        }
    } else if body.pos.x < wall_center.x {
        body.pos.x -= depth.x;
        if body.vel.x > 0.0 {
            body.vel.x = -body.vel.x * body.bounce.x;
        }
    } else {
        body.pos.x += depth.x;
        if body.vel.x < 0.0 {
            body.vel.x = -body.vel.x * body.bounce.x;
        }
    }

    true
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod anims;
pub mod body;
pub mod physics;
pub mod state;
pub mod tick;

pub use anims::{AnimKey, AnimationClip, AnimationSet, Animator};
pub use body::{Aabb, Body};
pub use physics::{ArcadeWorld, Interaction, separate_from_static};
pub use state::{Bomb, GameEvent, GamePhase, Platform, Player, Scene, SceneLayout, Star};
pub use tick::{
    TickInput, bomb_spawn_x, collect_star, hit_bomb, reset_stars, spawn_bomb, step_physics, tick,
};

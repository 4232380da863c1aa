//! Pineapple Panic - A single-screen browser platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (arcade physics, scene state, gameplay rules)
//! - `renderer`: WebGPU rendering pipeline
//! - `assets`: Image manifest and browser preload
//! - `config`: Game configuration (canvas, physics) with LocalStorage override
//! - `hud`: Score and game-over text overlays

pub mod assets;
pub mod config;
pub mod hud;
pub mod renderer;
pub mod sim;

pub use assets::{AssetKey, AssetManifest};
pub use config::{ArcadeConfig, GameConfig, RendererKind};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one scene update per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Canvas / world dimensions
    pub const WORLD_WIDTH: f32 = 1000.0;
    pub const WORLD_HEIGHT: f32 = 800.0;
    /// Downward gravity (pixels/s²)
    pub const GRAVITY_Y: f32 = 300.0;

    /// Background placement
    pub const SKY_POS: (f32, f32) = (400.0, 500.0);
    pub const SKY_SCALE: f32 = 2.0;

    /// Platforms: (x, y, scale), centers in world pixels
    pub const PLATFORMS: [(f32, f32, f32); 6] = [
        (20.0, 780.0, 2.0), // Ground, left half
        (700.0, 780.0, 2.0), // Ground, right half
        (670.0, 220.0, 1.0),
        (270.0, 350.0, 1.0),
        (670.0, 500.0, 1.0),
        (400.0, 620.0, 1.0),
    ];

    /// Player defaults
    pub const PLAYER_SPAWN: (f32, f32) = (100.0, 0.0);
    pub const PLAYER_SCALE: f32 = 0.2;
    pub const PLAYER_BOUNCE: f32 = 0.2;
    pub const PLAYER_RUN_SPEED: f32 = 160.0;
    pub const PLAYER_CLIMB_SPEED: f32 = 200.0;

    /// Collectibles
    pub const STAR_COUNT: usize = 12;
    pub const STAR_SCALE: f32 = 2.0;
    pub const STAR_STEP_X: f32 = 70.0;
    /// First star x is drawn from this inclusive range
    pub const STAR_START_X: (i32, i32) = (5, 15);
    /// Star y on every (re)activation, inclusive
    pub const STAR_SPAWN_Y: (i32, i32) = (0, 650);
    /// Star bounce, half-open
    pub const STAR_BOUNCE: (f32, f32) = (0.5, 0.9);
    /// Points per star, multiplied by (1 + hazard count)
    pub const STAR_POINTS: u64 = 10;

    /// Hazards
    pub const BOMB_SCALE: f32 = 0.05;
    pub const BOMB_BOUNCE: f32 = 1.0;
    pub const BOMB_SPAWN_Y: f32 = 10.0;
    pub const BOMB_FALL_SPEED: f32 = 20.0;
    /// Player x below this spawns hazards on the right half, otherwise the left
    pub const BOMB_SIDE_SPLIT: i32 = 400;
    /// Right edge of the right-hand spawn range
    pub const BOMB_SPAWN_MAX_X: i32 = 800;
    /// Horizontal hazard speed, half-open
    pub const BOMB_SPEED_X: (i32, i32) = (-200, 200);

    /// Player tint once hit
    pub const HIT_TINT: u32 = 0xff0000;
}

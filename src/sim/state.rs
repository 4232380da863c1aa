//! Scene state and core simulation types
//!
//! Everything one scene instance owns lives in `Scene`; a restart throws the
//! whole struct away and builds a fresh one.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::anims::{AnimKey, AnimationSet, Animator};
use super::body::{Aabb, Body};
use super::physics::{ArcadeWorld, Interaction};
use crate::assets::{AssetKey, AssetManifest};
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player touched a hazard; physics is frozen until restart
    GameOver,
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    StarCollected { star_id: u32, points: u64, score: u64 },
    StarsReset,
    BombSpawned { bomb_id: u32, x: f32 },
    GameOver { score: u64, bomb_id: Option<u32> },
    Restarted { seed: u64 },
}

/// Geometry shared by every scene instance, derived from config and assets
#[derive(Debug, Clone)]
pub struct SceneLayout {
    pub world_size: Vec2,
    pub gravity: Vec2,
    /// Scaled background rectangle
    pub background: Aabb,
    pub platforms: Vec<Aabb>,
    pub player_spawn: Vec2,
    pub player_size: Vec2,
    pub star_size: Vec2,
    pub bomb_size: Vec2,
}

impl SceneLayout {
    pub fn new(config: &GameConfig, assets: &AssetManifest) -> Self {
        let ground = assets.cell_size(AssetKey::Ground);
        let platforms = PLATFORMS
            .iter()
            .map(|&(x, y, scale)| Aabb::from_center_size(Vec2::new(x, y), ground * scale))
            .collect();

        Self {
            world_size: Vec2::new(config.width as f32, config.height as f32),
            gravity: Vec2::new(0.0, config.physics.gravity_y),
            background: Aabb::from_center_size(
                Vec2::new(SKY_POS.0, SKY_POS.1),
                assets.cell_size(AssetKey::Sky) * SKY_SCALE,
            ),
            platforms,
            player_spawn: Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1),
            player_size: assets.cell_size(AssetKey::Dude) * PLAYER_SCALE,
            star_size: assets.cell_size(AssetKey::Pineapple) * STAR_SCALE,
            bomb_size: assets.cell_size(AssetKey::Shrimp) * BOMB_SCALE,
        }
    }
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self::new(&GameConfig::default(), &AssetManifest::default())
    }
}

/// A static platform
#[derive(Debug, Clone)]
pub struct Platform {
    pub id: u32,
    pub bounds: Aabb,
}

/// The player sprite
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    /// RGB tint applied over the sprite
    pub tint: Option<u32>,
    pub anim: Animator,
}

/// A collectible; collected stars are deactivated, never removed
#[derive(Debug, Clone)]
pub struct Star {
    pub id: u32,
    pub body: Body,
    pub active: bool,
    pub visible: bool,
}

impl Star {
    pub fn deactivate(&mut self) {
        self.active = false;
        self.visible = false;
        self.body.disable();
    }
}

/// A hazard
#[derive(Debug, Clone)]
pub struct Bomb {
    pub id: u32,
    pub body: Body,
}

/// Complete scene state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct Scene {
    /// Seed this instance was created with
    pub seed: u64,
    pub(super) rng: Pcg32,
    pub layout: SceneLayout,
    pub world: ArcadeWorld,
    pub anims: AnimationSet,
    pub score: u64,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub platforms: Vec<Platform>,
    /// Fixed set, sorted by id
    pub stars: Vec<Star>,
    /// Grows for the lifetime of the scene, sorted by id
    pub bombs: Vec<Bomb>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl Scene {
    /// Build a fresh scene: background, platforms, player, animations,
    /// physics pairings, collectibles. Score starts at zero.
    pub fn create(layout: SceneLayout, seed: u64) -> Self {
        let mut world = ArcadeWorld::new(layout.gravity, layout.world_size);

        let player = Player {
            body: Body::new(layout.player_spawn, layout.player_size)
                .with_bounce(PLAYER_BOUNCE)
                .with_world_bounds(),
            tint: None,
            anim: Animator::default(),
        };

        world.register(Interaction::PlayerPlatforms);
        world.register(Interaction::StarsPlatforms);
        world.register(Interaction::BombsPlatforms);
        world.register(Interaction::PlayerStars);
        world.register(Interaction::PlayerBombs);

        let mut scene = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            platforms: Vec::with_capacity(layout.platforms.len()),
            layout,
            world,
            anims: AnimationSet::player(),
            score: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player,
            stars: Vec::with_capacity(STAR_COUNT),
            bombs: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        for i in 0..scene.layout.platforms.len() {
            let id = scene.next_entity_id();
            let bounds = scene.layout.platforms[i];
            scene.platforms.push(Platform { id, bounds });
        }

        scene.spawn_stars();
        super::tick::reset_stars(&mut scene);
        scene.player.anim.play(AnimKey::Turn, false);

        scene
    }

    /// Tear everything down and start over. The new seed comes from this
    /// scene's RNG, so a run stays reproducible from its first seed.
    pub fn restart(&mut self) {
        let seed: u64 = self.rng.random();
        let layout = self.layout.clone();
        *self = Scene::create(layout, seed);
        self.events.push(GameEvent::Restarted { seed });
        log::info!("Scene restarted with seed: {}", seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn active_star_count(&self) -> usize {
        self.stars.iter().filter(|s| s.active).count()
    }

    pub fn bomb_count(&self) -> usize {
        self.bombs.len()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Lay out the collectible row; positions settle in `reset_stars`
    fn spawn_stars(&mut self) {
        let start_x = self.rng.random_range(STAR_START_X.0..=STAR_START_X.1) as f32;
        for i in 0..STAR_COUNT {
            let id = self.next_entity_id();
            let x = start_x + STAR_STEP_X * i as f32;
            self.stars.push(Star {
                id,
                body: Body::new(Vec2::new(x, 0.0), self.layout.star_size),
                active: true,
                visible: true,
            });
        }
    }
}

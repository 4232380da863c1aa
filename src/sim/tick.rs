//! Fixed timestep simulation tick
//!
//! One call to `tick` is one frame of the scene: the physics step the host
//! engine would run, followed by the scene's own update (movement, hazard
//! spawn key, restart key). Gameplay callbacks fired by the physics step
//! (`collect_star`, `hit_bomb`) are plain functions over the scene.

use glam::Vec2;
use rand::Rng;

use super::anims::AnimKey;
use super::body::Body;
use super::physics::{Interaction, separate_from_static};
use super::state::{Bomb, GameEvent, GamePhase, Scene};
use crate::consts::*;

/// Held keys for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Arrow keys
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Shift: add a hazard every tick while held
    pub spawn_bomb: bool,
    /// Space: throw the scene away and start over
    pub restart: bool,
}

/// Advance the scene by one fixed timestep
pub fn tick(scene: &mut Scene, input: &TickInput, dt: f32) {
    scene.time_ticks += 1;

    if !scene.world.paused {
        step_physics(scene, dt);
    }
    scene.player.anim.advance(&scene.anims, dt);

    player_control(scene, input);

    if input.spawn_bomb {
        spawn_bomb(scene);
    }

    if input.restart {
        scene.restart();
    }
}

/// Velocity straight from the keys, no acceleration
fn player_control(scene: &mut Scene, input: &TickInput) {
    let player = &mut scene.player;

    if input.left || input.right {
        player.body.vel.x = if input.left {
            -PLAYER_RUN_SPEED
        } else {
            PLAYER_RUN_SPEED
        };
        player
            .anim
            .play(if input.left { AnimKey::Left } else { AnimKey::Right }, true);
    } else {
        player.body.vel.x = 0.0;
        player.anim.play(AnimKey::Turn, false);
    }

    if input.up || input.down {
        player.body.vel.y = if input.up {
            -PLAYER_CLIMB_SPEED
        } else {
            PLAYER_CLIMB_SPEED
        };
    }
}

/// Integrate every enabled body, then resolve registered pairings in order.
/// A callback that pauses the world stops the remaining pairings.
pub fn step_physics(scene: &mut Scene, dt: f32) {
    let world = &scene.world;
    world.integrate(&mut scene.player.body, dt);
    for star in &mut scene.stars {
        world.integrate(&mut star.body, dt);
    }
    for bomb in &mut scene.bombs {
        world.integrate(&mut bomb.body, dt);
    }

    let interactions = scene.world.interactions().to_vec();
    for interaction in interactions {
        if scene.world.paused {
            break;
        }
        match interaction {
            Interaction::PlayerPlatforms => {
                for platform in &scene.platforms {
                    separate_from_static(&mut scene.player.body, &platform.bounds);
                }
            }
            Interaction::StarsPlatforms => {
                for star in &mut scene.stars {
                    for platform in &scene.platforms {
                        separate_from_static(&mut star.body, &platform.bounds);
                    }
                }
            }
            Interaction::BombsPlatforms => {
                for bomb in &mut scene.bombs {
                    for platform in &scene.platforms {
                        separate_from_static(&mut bomb.body, &platform.bounds);
                    }
                }
            }
            Interaction::PlayerStars => {
                for i in 0..scene.stars.len() {
                    if scene.player.body.touches(&scene.stars[i].body) {
                        collect_star(scene, i);
                    }
                }
            }
            Interaction::PlayerBombs => {
                let hit = scene
                    .bombs
                    .iter()
                    .position(|b| scene.player.body.touches(&b.body));
                if let Some(index) = hit {
                    hit_bomb(scene, index);
                }
            }
        }
    }
}

/// Collect the star at `index`. Returns the points awarded, or `None` if the
/// star is missing, already collected, or the game is over.
///
/// Collecting the last active star reactivates the whole set and adds a hazard.
pub fn collect_star(scene: &mut Scene, index: usize) -> Option<u64> {
    if scene.is_game_over() {
        return None;
    }
    let star = scene.stars.get_mut(index)?;
    if !star.active {
        return None;
    }
    star.deactivate();
    let star_id = star.id;

    let points = STAR_POINTS * (1 + scene.bombs.len() as u64);
    scene.score += points;
    scene.events.push(GameEvent::StarCollected {
        star_id,
        points,
        score: scene.score,
    });

    if scene.active_star_count() == 0 {
        reset_stars(scene);
        scene.events.push(GameEvent::StarsReset);
        log::debug!("All stars collected, score {}", scene.score);
        spawn_bomb(scene);
    }

    Some(points)
}

/// Reactivate every star at its column with a fresh height and bounce
pub fn reset_stars(scene: &mut Scene) {
    let rng = &mut scene.rng;
    for star in &mut scene.stars {
        let y = rng.random_range(STAR_SPAWN_Y.0..=STAR_SPAWN_Y.1) as f32;
        star.body.reset(Vec2::new(star.body.pos.x, y));
        star.body.bounce = Vec2::splat(rng.random_range(STAR_BOUNCE.0..STAR_BOUNCE.1));
        star.active = true;
        star.visible = true;
    }
}

/// Hazard x on the half of the screen away from the player
pub fn bomb_spawn_x<R: Rng>(player_x: f32, rng: &mut R) -> f32 {
    let x = if player_x < BOMB_SIDE_SPLIT as f32 {
        rng.random_range(BOMB_SIDE_SPLIT..BOMB_SPAWN_MAX_X)
    } else {
        rng.random_range(0..BOMB_SIDE_SPLIT)
    };
    x as f32
}

/// Append a hazard near the top of the screen. Returns its id.
pub fn spawn_bomb(scene: &mut Scene) -> u32 {
    let x = bomb_spawn_x(scene.player.body.pos.x, &mut scene.rng);
    let vx = scene.rng.random_range(BOMB_SPEED_X.0..BOMB_SPEED_X.1) as f32;

    let mut body = Body::new(Vec2::new(x, BOMB_SPAWN_Y), scene.layout.bomb_size)
        .with_bounce(BOMB_BOUNCE)
        .with_world_bounds();
    body.vel = Vec2::new(vx, BOMB_FALL_SPEED);

    let id = scene.next_entity_id();
    scene.bombs.push(Bomb { id, body });
    scene.events.push(GameEvent::BombSpawned { bomb_id: id, x });
    log::debug!("Bomb {} spawned at x={} (total {})", id, x, scene.bombs.len());
    id
}

/// Player touched a hazard: freeze physics, tint the player, show the end
/// message. Returns false if the game was already over.
pub fn hit_bomb(scene: &mut Scene, bomb_index: usize) -> bool {
    if scene.is_game_over() {
        return false;
    }

    scene.world.pause();
    scene.player.tint = Some(HIT_TINT);
    scene.player.anim.play(AnimKey::Turn, false);
    scene.phase = GamePhase::GameOver;

    let bomb_id = scene.bombs.get(bomb_index).map(|b| b.id);
    scene.events.push(GameEvent::GameOver {
        score: scene.score,
        bomb_id,
    });
    log::info!("Game over with score {}", scene.score);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SceneLayout;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn scene(seed: u64) -> Scene {
        Scene::create(SceneLayout::default(), seed)
    }

    /// Park the player far from everything so physics never fires callbacks
    fn park_player(scene: &mut Scene) {
        scene.player.body.pos = Vec2::new(980.0, 40.0);
        scene.player.body.allow_gravity = false;
    }

    #[test]
    fn test_collect_score_example() {
        let mut scene = scene(1);
        assert_eq!(collect_star(&mut scene, 0), Some(10));
        assert_eq!(scene.score, 10);

        spawn_bomb(&mut scene);
        assert_eq!(collect_star(&mut scene, 1), Some(20));
        assert_eq!(scene.score, 30);
    }

    #[test]
    fn test_collect_deactivates_star() {
        let mut scene = scene(2);
        collect_star(&mut scene, 3);
        let star = &scene.stars[3];
        assert!(!star.active);
        assert!(!star.visible);
        assert!(!star.body.enabled);
        assert_eq!(scene.active_star_count(), STAR_COUNT - 1);

        // Second collect of the same star does nothing
        assert_eq!(collect_star(&mut scene, 3), None);
        assert_eq!(collect_star(&mut scene, 99), None);
        assert_eq!(scene.score, 10);
    }

    #[test]
    fn test_last_star_resets_set_and_adds_one_bomb() {
        let mut scene = scene(3);
        for i in 0..STAR_COUNT - 1 {
            collect_star(&mut scene, i);
        }
        assert_eq!(scene.active_star_count(), 1);
        assert!(scene.bombs.is_empty());

        let columns: Vec<f32> = scene.stars.iter().map(|s| s.body.pos.x).collect();
        scene.stars[STAR_COUNT - 1].body.vel = Vec2::new(30.0, -80.0);

        collect_star(&mut scene, STAR_COUNT - 1);
        assert_eq!(scene.active_star_count(), STAR_COUNT);
        for (star, x) in scene.stars.iter().zip(&columns) {
            assert_eq!(star.body.pos.x, *x);
            assert!((0.0..=650.0).contains(&star.body.pos.y));
            assert_eq!(star.body.pos.y.fract(), 0.0);
            assert_eq!(star.body.vel, Vec2::ZERO);
            assert!((0.5..0.9).contains(&star.body.bounce.y));
            assert_eq!(star.body.bounce.x, star.body.bounce.y);
        }
        assert_eq!(scene.bombs.len(), 1);
        assert_eq!(scene.score, 10 * STAR_COUNT as u64);
        assert!(scene.stars.iter().all(|s| s.visible && s.body.enabled));
        assert!(scene.events.contains(&GameEvent::StarsReset));

        // Next round pays double
        assert_eq!(collect_star(&mut scene, 0), Some(20));
    }

    #[test]
    fn test_spawn_bomb_properties() {
        let mut scene = scene(4);
        scene.player.body.pos.x = 100.0;
        spawn_bomb(&mut scene);
        let bomb = &scene.bombs[0].body;
        assert!((400.0..800.0).contains(&bomb.pos.x));
        assert_eq!(bomb.pos.y, BOMB_SPAWN_Y);
        assert_eq!(bomb.vel.y, BOMB_FALL_SPEED);
        assert!((-200.0..200.0).contains(&bomb.vel.x));
        assert_eq!(bomb.bounce, Vec2::ONE);
        assert!(bomb.collide_world_bounds);

        scene.player.body.pos.x = 400.0;
        spawn_bomb(&mut scene);
        assert!((0.0..400.0).contains(&scene.bombs[1].body.pos.x));
    }

    #[test]
    fn test_hit_bomb_ends_game_once() {
        let mut scene = scene(5);
        collect_star(&mut scene, 0);
        spawn_bomb(&mut scene);
        scene.drain_events();

        assert!(hit_bomb(&mut scene, 0));
        assert!(scene.is_game_over());
        assert!(scene.world.paused);
        assert_eq!(scene.player.tint, Some(0xff0000));
        assert_eq!(scene.player.anim.current(), Some(AnimKey::Turn));
        assert_eq!(
            scene.drain_events(),
            vec![GameEvent::GameOver {
                score: 10,
                bomb_id: Some(scene.bombs[0].id)
            }]
        );

        assert!(!hit_bomb(&mut scene, 0));
        assert!(scene.events.is_empty());
    }

    #[test]
    fn test_no_scoring_after_game_over() {
        let mut scene = scene(6);
        hit_bomb(&mut scene, 0);
        assert_eq!(collect_star(&mut scene, 0), None);
        assert_eq!(scene.score, 0);
        assert!(scene.stars[0].active);
    }

    #[test]
    fn test_paused_world_freezes_bodies() {
        let mut scene = scene(7);
        spawn_bomb(&mut scene);
        hit_bomb(&mut scene, 0);

        let bomb_pos = scene.bombs[0].body.pos;
        let star_pos = scene.stars[0].body.pos;
        for _ in 0..30 {
            tick(&mut scene, &TickInput::default(), SIM_DT);
        }
        assert_eq!(scene.bombs[0].body.pos, bomb_pos);
        assert_eq!(scene.stars[0].body.pos, star_pos);
    }

    #[test]
    fn test_movement_from_keys() {
        let mut scene = scene(8);
        park_player(&mut scene);

        let left = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut scene, &left, SIM_DT);
        assert_eq!(scene.player.body.vel.x, -PLAYER_RUN_SPEED);
        assert_eq!(scene.player.anim.current(), Some(AnimKey::Left));

        let right = TickInput {
            right: true,
            down: true,
            ..Default::default()
        };
        tick(&mut scene, &right, SIM_DT);
        assert_eq!(scene.player.body.vel.x, PLAYER_RUN_SPEED);
        assert_eq!(scene.player.body.vel.y, PLAYER_CLIMB_SPEED);
        assert_eq!(scene.player.anim.current(), Some(AnimKey::Right));

        let up = TickInput {
            up: true,
            down: true,
            ..Default::default()
        };
        tick(&mut scene, &up, SIM_DT);
        assert_eq!(scene.player.body.vel.x, 0.0);
        assert_eq!(scene.player.body.vel.y, -PLAYER_CLIMB_SPEED);
        assert_eq!(scene.player.anim.current(), Some(AnimKey::Turn));
    }

    #[test]
    fn test_shift_spawns_every_tick() {
        let mut scene = scene(9);
        park_player(&mut scene);
        let input = TickInput {
            spawn_bomb: true,
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut scene, &input, SIM_DT);
        }
        assert_eq!(scene.bombs.len(), 5);
    }

    #[test]
    fn test_space_restarts_scene() {
        let mut scene = scene(10);
        collect_star(&mut scene, 0);
        spawn_bomb(&mut scene);
        hit_bomb(&mut scene, 0);

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut scene, &input, SIM_DT);

        assert_eq!(scene.score, 0);
        assert!(!scene.is_game_over());
        assert!(!scene.world.paused);
        assert_eq!(scene.active_star_count(), STAR_COUNT);
        assert!(scene.bombs.is_empty());
        assert_eq!(scene.player.tint, None);
        assert_eq!(scene.time_ticks, 0);
    }

    #[test]
    fn test_player_comes_to_rest_on_platform() {
        let mut scene = scene(11);
        // Player spawns above the (270, 350) platform, top edge at 334
        for _ in 0..600 {
            tick(&mut scene, &TickInput::default(), SIM_DT);
        }
        let body = &scene.player.body;
        let bottom = body.pos.y + body.size.y / 2.0;
        assert!((bottom - 334.0).abs() < 1.0, "bottom = {}", bottom);
        assert!(body.vel.y.abs() < 10.0);
    }

    #[test]
    fn test_stars_settle_on_ground() {
        let mut scene = scene(12);
        park_player(&mut scene);
        for _ in 0..1200 {
            tick(&mut scene, &TickInput::default(), SIM_DT);
        }
        // No star falls out of the world: the ground spans the full width
        for star in &scene.stars {
            assert!(star.body.pos.y < 800.0, "star {} fell to {}", star.id, star.body.pos.y);
        }
    }

    #[test]
    fn test_touching_bomb_ends_game() {
        let mut scene = scene(13);
        park_player(&mut scene);
        spawn_bomb(&mut scene);
        scene.bombs[0].body.pos = scene.player.body.pos;
        scene.bombs[0].body.vel = Vec2::ZERO;

        let mut free = scene.player.body.clone();
        scene.world.integrate(&mut free, SIM_DT);
        tick(&mut scene, &TickInput::default(), SIM_DT);
        assert!(scene.is_game_over());
        // Contact only fires the callback; nothing is pushed apart
        assert_eq!(scene.player.body.pos, free.pos);
        assert_eq!(scene.player.body.vel, free.vel);
    }

    #[test]
    fn test_bomb_bounces_on_platform() {
        let mut scene = scene(15);
        park_player(&mut scene);
        spawn_bomb(&mut scene);
        // Over the (400, 620) platform, top edge at 604
        scene.bombs[0].body.pos = Vec2::new(400.0, 500.0);
        scene.bombs[0].body.vel = Vec2::ZERO;
        let half = scene.bombs[0].body.size.y / 2.0;

        let mut bounced = false;
        for _ in 0..600 {
            tick(&mut scene, &TickInput::default(), SIM_DT);
            let body = &scene.bombs[0].body;
            assert!(body.pos.y + half <= 604.0 + 1e-3, "bottom = {}", body.pos.y + half);
            assert_eq!(body.pos.x, 400.0);
            bounced |= body.vel.y < 0.0;
        }
        assert!(bounced);
        assert!(!scene.is_game_over());
    }

    #[test]
    fn test_touching_star_collects_it() {
        let mut scene = scene(14);
        park_player(&mut scene);
        scene.stars[5].body.pos = scene.player.body.pos;
        scene.stars[5].body.allow_gravity = false;

        tick(&mut scene, &TickInput::default(), SIM_DT);
        assert!(!scene.stars[5].active);
        assert_eq!(scene.score, 10);
    }

    #[test]
    fn test_determinism() {
        let mut a = scene(99999);
        let mut b = scene(99999);
        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                spawn_bomb: true,
                ..Default::default()
            },
            TickInput {
                up: true,
                left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..50 {
            for input in &inputs {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
            }
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.bombs.len(), b.bombs.len());
        assert_eq!(a.player.body.pos, b.player.body.pos);
        for (x, y) in a.bombs.iter().zip(&b.bombs) {
            assert_eq!(x.body.pos, y.body.pos);
        }
    }

    proptest! {
        #[test]
        fn prop_bomb_spawns_away_from_player(seed in any::<u64>(), player_x in 0.0f32..1000.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let x = bomb_spawn_x(player_x, &mut rng);
            if player_x < 400.0 {
                prop_assert!((400.0..800.0).contains(&x));
            } else {
                prop_assert!((0.0..400.0).contains(&x));
            }
        }

        #[test]
        fn prop_score_is_sum_of_weighted_collects(
            seed in any::<u64>(),
            ops in prop::collection::vec((any::<bool>(), 0usize..STAR_COUNT), 0..80),
        ) {
            let mut scene = scene(seed);
            let mut expected = 0u64;
            for (spawn, index) in ops {
                if spawn {
                    spawn_bomb(&mut scene);
                } else {
                    let hazards = scene.bombs.len() as u64;
                    let bombs_before = scene.bombs.len();
                    let last = scene.active_star_count() == 1 && scene.stars[index].active;
                    if let Some(points) = collect_star(&mut scene, index) {
                        prop_assert_eq!(points, 10 * (1 + hazards));
                        expected += points;
                        if last {
                            prop_assert_eq!(scene.active_star_count(), STAR_COUNT);
                            prop_assert_eq!(scene.bombs.len(), bombs_before + 1);
                        }
                    }
                }
            }
            prop_assert_eq!(scene.score, expected);
        }

        #[test]
        fn prop_restart_resets_everything(
            seed in any::<u64>(),
            collects in 0usize..30,
            bombs in 0usize..10,
            game_over in any::<bool>(),
        ) {
            let mut scene = scene(seed);
            for i in 0..collects {
                collect_star(&mut scene, i % STAR_COUNT);
            }
            for _ in 0..bombs {
                spawn_bomb(&mut scene);
            }
            if game_over {
                hit_bomb(&mut scene, 0);
            }

            scene.restart();
            prop_assert_eq!(scene.score, 0);
            prop_assert!(!scene.is_game_over());
            prop_assert_eq!(scene.active_star_count(), STAR_COUNT);
            prop_assert!(scene.bombs.is_empty());
        }
    }
}

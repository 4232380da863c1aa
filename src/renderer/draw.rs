//! Scene to vertex list
//!
//! Builds one triangle list per frame in world coordinates, back to front:
//! background, platforms, collectibles, hazards, player, then debug outlines.

use glam::Vec2;

use super::shapes::{circle, rect, rect_gradient, rect_outline, ring, tinted};
use super::vertex::{Vertex, colors};
use crate::sim::{Aabb, Player, Scene};

/// Generate all vertices for the current scene
pub fn scene_vertices(scene: &Scene, debug: bool) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(1024);

    vertices.extend(rect_gradient(
        &scene.layout.background,
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    ));

    for platform in &scene.platforms {
        vertices.extend(rect(&platform.bounds, colors::GROUND));
        let lip = Aabb::new(
            platform.bounds.min,
            Vec2::new(platform.bounds.max.x, platform.bounds.min.y + 4.0),
        );
        vertices.extend(rect(&lip, colors::GROUND_EDGE));
    }

    for star in scene.stars.iter().filter(|s| s.visible) {
        vertices.extend(pineapple(&star.body.aabb()));
    }

    for bomb in &scene.bombs {
        let aabb = bomb.body.aabb();
        let r = aabb.size().x.min(aabb.size().y) * 0.5;
        vertices.extend(circle(aabb.center(), r * 0.8, colors::VIRUS, 16));
        vertices.extend(ring(aabb.center(), r * 0.8, r, colors::VIRUS_SPIKES, 8));
    }

    let frame = scene.player.anim.frame(&scene.anims);
    vertices.extend(player(&scene.player, frame));

    if debug {
        for platform in &scene.platforms {
            vertices.extend(rect_outline(&platform.bounds, 1.0, colors::DEBUG_STATIC));
        }
        let bodies = std::iter::once(&scene.player.body)
            .chain(scene.stars.iter().map(|s| &s.body))
            .chain(scene.bombs.iter().map(|b| &b.body))
            .filter(|b| b.enabled);
        for body in bodies {
            vertices.extend(rect_outline(&body.aabb(), 1.0, colors::DEBUG_BODY));
        }
    }

    vertices
}

fn pineapple(aabb: &Aabb) -> Vec<Vertex> {
    let size = aabb.size();
    let fruit = Aabb::new(
        Vec2::new(aabb.min.x + size.x * 0.15, aabb.min.y + size.y * 0.35),
        Vec2::new(aabb.max.x - size.x * 0.15, aabb.max.y),
    );
    let crown = Aabb::new(
        Vec2::new(aabb.min.x + size.x * 0.35, aabb.min.y),
        Vec2::new(aabb.max.x - size.x * 0.35, fruit.min.y),
    );
    let mut vertices = rect(&fruit, colors::PINEAPPLE);
    vertices.extend(rect(&crown, colors::PINEAPPLE_LEAVES));
    vertices
}

/// Player figure; sheet frames 0-3 walk left, 4 faces the camera, 5-8 walk right
fn player(player: &Player, frame: Option<u32>) -> Vec<Vertex> {
    let aabb = player.body.aabb();
    let size = aabb.size();
    let center = aabb.center();
    let frame = frame.unwrap_or(4);

    let (facing, step) = match frame {
        0..=3 => (-1.0, frame),
        5..=8 => (1.0, frame - 5),
        _ => (0.0, 0),
    };

    let suit = tinted(colors::PLAYER, player.tint);
    let skin = tinted(colors::PLAYER_SKIN, player.tint);
    let eye_color = tinted(colors::PLAYER_EYE, player.tint);

    let head_r = size.x * 0.3;
    let head_center = Vec2::new(center.x, aabb.min.y + head_r);
    let torso = Aabb::new(
        Vec2::new(aabb.min.x + size.x * 0.15, head_center.y + head_r),
        Vec2::new(aabb.max.x - size.x * 0.15, aabb.min.y + size.y * 0.75),
    );

    let mut vertices = Vec::with_capacity(96);
    vertices.extend(rect(&torso, suit));

    // Alternate leg lift on odd walk frames
    let lift = if step % 2 == 1 { size.y * 0.06 } else { 0.0 };
    let leg_w = size.x * 0.25;
    let left_leg = Aabb::new(
        Vec2::new(torso.min.x, torso.max.y),
        Vec2::new(torso.min.x + leg_w, aabb.max.y - lift),
    );
    let right_leg = Aabb::new(
        Vec2::new(torso.max.x - leg_w, torso.max.y),
        Vec2::new(torso.max.x, aabb.max.y - (size.y * 0.06 - lift)),
    );
    vertices.extend(rect(&left_leg, suit));
    vertices.extend(rect(&right_leg, suit));

    vertices.extend(circle(head_center, head_r, skin, 16));
    let eye = head_center + Vec2::new(facing * head_r * 0.45, -head_r * 0.1);
    vertices.extend(circle(eye, head_r * 0.18, eye_color, 8));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SceneLayout, collect_star, hit_bomb, spawn_bomb};

    #[test]
    fn test_hidden_stars_not_drawn() {
        let mut scene = Scene::create(SceneLayout::default(), 5);
        let before = scene_vertices(&scene, false).len();
        collect_star(&mut scene, 0);
        let after = scene_vertices(&scene, false).len();
        // One pineapple is two rectangles
        assert_eq!(before - after, 12);
    }

    #[test]
    fn test_bombs_add_geometry() {
        let mut scene = Scene::create(SceneLayout::default(), 5);
        let before = scene_vertices(&scene, false).len();
        spawn_bomb(&mut scene);
        let after = scene_vertices(&scene, false).len();
        assert_eq!(after - before, 16 * 3 + 8 * 6);
    }

    #[test]
    fn test_debug_outlines() {
        let scene = Scene::create(SceneLayout::default(), 5);
        let plain = scene_vertices(&scene, false).len();
        let debug = scene_vertices(&scene, true).len();
        // Six platforms, the player and twelve stars
        assert_eq!(debug - plain, (6 + 1 + 12) * 24);
    }

    #[test]
    fn test_hit_player_drawn_red() {
        let mut scene = Scene::create(SceneLayout::default(), 5);
        hit_bomb(&mut scene, 0);
        let verts = player(&scene.player, Some(4));
        assert!(verts.iter().all(|v| v.color[1] == 0.0 && v.color[2] == 0.0));
    }

    #[test]
    fn test_player_faces_walk_direction() {
        let scene = Scene::create(SceneLayout::default(), 5);
        let center_x = scene.player.body.pos.x;
        let eye_x = |frame| {
            let verts = player(&scene.player, Some(frame));
            let eye = verts
                .iter()
                .filter(|v| v.color == colors::PLAYER_EYE)
                .map(|v| v.position[0])
                .sum::<f32>();
            eye / 24.0
        };
        assert!(eye_x(1) < center_x);
        assert!(eye_x(6) > center_x);
    }
}

//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in world coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Aabb;

/// Multiply a color by a 0xRRGGBB tint
pub fn tinted(color: [f32; 4], tint: Option<u32>) -> [f32; 4] {
    match tint {
        Some(rgb) => {
            let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
            let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
            let b = (rgb & 0xff) as f32 / 255.0;
            [color[0] * r, color[1] * g, color[2] * b, color[3]]
        }
        None => color,
    }
}

/// Generate vertices for a filled rectangle
pub fn rect(aabb: &Aabb, color: [f32; 4]) -> Vec<Vertex> {
    rect_gradient(aabb, color, color)
}

/// Filled rectangle with a vertical gradient (top to bottom)
pub fn rect_gradient(aabb: &Aabb, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    let (min, max) = (aabb.min, aabb.max);
    vec![
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}

/// Rectangle outline made of four thin rectangles
pub fn rect_outline(aabb: &Aabb, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (min, max) = (aabb.min, aabb.max);
    let t = thickness;
    let edges = [
        Aabb::new(min, Vec2::new(max.x, min.y + t)),
        Aabb::new(Vec2::new(min.x, max.y - t), max),
        Aabb::new(min, Vec2::new(min.x + t, max.y)),
        Aabb::new(Vec2::new(max.x - t, min.y), max),
    ];

    let mut vertices = Vec::with_capacity(24);
    for edge in &edges {
        vertices.extend(rect(edge, color));
    }
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + inner_radius * Vec2::new(theta1.cos(), theta1.sin());
        let outer1 = center + outer_radius * Vec2::new(theta1.cos(), theta1.sin());
        let inner2 = center + inner_radius * Vec2::new(theta2.cos(), theta2.sin());
        let outer2 = center + outer_radius * Vec2::new(theta2.cos(), theta2.sin());

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let aabb = Aabb::new(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0));
        let verts = rect(&aabb, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        for corner in [[10.0, 20.0], [30.0, 20.0], [10.0, 40.0], [30.0, 40.0]] {
            assert!(verts.iter().any(|v| v.position == corner));
        }
    }

    #[test]
    fn test_gradient_colors_by_edge() {
        let aabb = Aabb::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let top = [1.0, 0.0, 0.0, 1.0];
        let bottom = [0.0, 0.0, 1.0, 1.0];
        for v in rect_gradient(&aabb, top, bottom) {
            let expected = if v.position[1] == 0.0 { top } else { bottom };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_outline_vertex_count() {
        let aabb = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert_eq!(rect_outline(&aabb, 1.0, [1.0; 4]).len(), 24);
        assert_eq!(circle(Vec2::ZERO, 5.0, [1.0; 4], 12).len(), 36);
        assert_eq!(ring(Vec2::ZERO, 4.0, 5.0, [1.0; 4], 12).len(), 72);
    }

    #[test]
    fn test_red_tint() {
        let color = tinted([0.5, 0.5, 0.5, 1.0], Some(0xff0000));
        assert_eq!(color, [0.5, 0.0, 0.0, 1.0]);
        assert_eq!(tinted([0.5; 4], None), [0.5; 4]);
    }
}

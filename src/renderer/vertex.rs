//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.25, 0.5, 0.9, 1.0];
    pub const SKY_BOTTOM: [f32; 4] = [0.7, 0.85, 1.0, 1.0];
    pub const GROUND: [f32; 4] = [0.35, 0.6, 0.25, 1.0];
    pub const GROUND_EDGE: [f32; 4] = [0.25, 0.45, 0.15, 1.0];
    pub const PINEAPPLE: [f32; 4] = [0.98, 0.78, 0.2, 1.0];
    pub const PINEAPPLE_LEAVES: [f32; 4] = [0.2, 0.7, 0.25, 1.0];
    pub const VIRUS: [f32; 4] = [0.85, 0.15, 0.25, 1.0];
    pub const VIRUS_SPIKES: [f32; 4] = [0.55, 0.05, 0.15, 1.0];
    pub const PLAYER: [f32; 4] = [0.55, 0.35, 0.8, 1.0];
    pub const PLAYER_SKIN: [f32; 4] = [0.95, 0.8, 0.65, 1.0];
    pub const PLAYER_EYE: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
    pub const DEBUG_BODY: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    pub const DEBUG_STATIC: [f32; 4] = [0.0, 0.4, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}

//! WebGPU rendering module
//!
//! Flat-colored triangle lists built from the scene each frame.

pub mod draw;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use draw::scene_vertices;
pub use pipeline::RenderState;
pub use vertex::Vertex;

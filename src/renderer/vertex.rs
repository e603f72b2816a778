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
    pub const SKY_TOP: [f32; 4] = [0.45, 0.75, 0.98, 1.0];
    pub const SKY_BOTTOM: [f32; 4] = [0.78, 0.92, 1.0, 1.0];
    pub const GRASS: [f32; 4] = [0.30, 0.62, 0.25, 1.0];
    pub const BASKET: [f32; 4] = [0.62, 0.40, 0.18, 1.0];
    pub const BASKET_RIM: [f32; 4] = [0.45, 0.27, 0.10, 1.0];
    pub const APPLE: [f32; 4] = [0.86, 0.12, 0.12, 1.0];
    pub const LEAF: [f32; 4] = [0.20, 0.60, 0.20, 1.0];
    pub const COIN: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.46, 0.80, 1.0];
}

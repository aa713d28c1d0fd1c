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
    /// #03dac6
    pub const PADDLE: [f32; 4] = [0.012, 0.855, 0.776, 1.0];
    pub const BALL: [f32; 4] = PADDLE;
    /// #ff4081
    pub const BRICK_SPECIAL: [f32; 4] = [1.0, 0.251, 0.506, 1.0];
    /// #03a9f4
    pub const BRICK_NORMAL: [f32; 4] = [0.012, 0.663, 0.957, 1.0];
    pub const PAUSE_OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
    pub const BACKGROUND: [f32; 4] = [0.07, 0.07, 0.07, 1.0];
}

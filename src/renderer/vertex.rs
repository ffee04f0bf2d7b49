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

/// Opaque colour from a 0xRRGGBB literal
pub const fn hex(rgb: u32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::hex;

    pub const BACKGROUND: [f32; 4] = hex(0x1a1a2e);
    pub const GRID: [f32; 4] = hex(0x2d2d44);

    // Professor sprite palette
    pub const HAIR: [f32; 4] = hex(0x111827);
    pub const SKIN: [f32; 4] = hex(0xd4a373);
    pub const SHIRT: [f32; 4] = hex(0xffffff);
    pub const TIE: [f32; 4] = hex(0x374151);
    pub const SUIT: [f32; 4] = hex(0x1e40af);

    // Player mortarboard
    pub const CAP: [f32; 4] = hex(0x0f172a);
    pub const TASSEL: [f32; 4] = hex(0xfacc15);

    // Falling tasks
    pub const PAPER: [f32; 4] = hex(0xf8fafc);
    pub const INK: [f32; 4] = hex(0x3b82f6);
    pub const FAIL_MARK: [f32; 4] = hex(0xef4444);

    // Falling saves
    pub const DISK: [f32; 4] = hex(0x2563eb);
    pub const DISK_SHUTTER: [f32; 4] = hex(0x9ca3af);
    pub const DISK_LABEL: [f32; 4] = hex(0xffffff);
}

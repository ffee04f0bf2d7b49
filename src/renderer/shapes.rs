//! Shape generation for 2D primitives
//!
//! All coordinates are surface pixels with a top-left origin; the pipeline
//! maps them to clip space.

use glam::Vec2;

use super::vertex::Vertex;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a thick line segment
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> [Vertex; 6] {
    // Perpendicular for width
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    [
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Uniform grid of 1px lines every `cell` pixels, starting at the origin
pub fn grid(size: Vec2, cell: f32, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    if cell <= 0.0 {
        return Vec::new();
    }
    let columns = (size.x / cell).ceil() as usize;
    let rows = (size.y / cell).ceil() as usize;
    let mut vertices = Vec::with_capacity((columns + rows) * 6);

    for i in 0..columns {
        let x = i as f32 * cell;
        vertices.extend(rect(Vec2::new(x, 0.0), Vec2::new(thickness, size.y), color));
    }
    for j in 0..rows {
        let y = j as f32 * cell;
        vertices.extend(rect(Vec2::new(0.0, y), Vec2::new(size.x, thickness), color));
    }

    vertices
}

/// Blit a palette-indexed bitmap; index 0 is transparent
pub fn pixel_sprite<const W: usize>(
    origin: Vec2,
    scale: f32,
    rows: &[[u8; W]],
    palette: &[[f32; 4]],
) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for (r, row) in rows.iter().enumerate() {
        for (c, &cell) in row.iter().enumerate() {
            if cell == 0 {
                continue;
            }
            let Some(&color) = palette.get(cell as usize - 1) else {
                continue;
            };
            let min = origin + Vec2::new(c as f32, r as f32) * scale;
            vertices.extend(rect(min, Vec2::splat(scale), color));
        }
    }
    vertices
}

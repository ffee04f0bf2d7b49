//! Professor pixel art

use super::vertex::colors;

/// 12x12 bitmap: 0 transparent, 1 hair/beard, 2 skin, 3 shirt, 4 tie, 5 suit
#[rustfmt::skip]
pub const PROFESSOR: [[u8; 12]; 12] = [
    [0,0,1,1,1,1,1,1,1,1,0,0], // hair top
    [0,1,1,1,1,1,1,1,1,1,1,0],
    [1,1,2,2,2,2,2,2,2,2,1,1], // forehead
    [1,2,1,3,2,2,2,2,3,1,2,1], // eyes
    [1,2,2,2,2,2,2,2,2,2,2,1],
    [1,2,2,2,2,1,1,2,2,2,2,1], // nose
    [1,2,1,1,1,1,1,1,1,1,2,1], // mustache
    [1,1,1,1,2,4,4,2,1,1,1,1], // beard, open mouth
    [0,1,1,1,1,1,1,1,1,1,1,0], // chin
    [0,0,2,2,3,4,4,3,2,2,0,0], // collar
    [5,5,5,3,3,4,4,3,3,5,5,5], // shoulders
    [5,5,5,5,3,3,3,3,5,5,5,5],
];

/// Palette for `PROFESSOR`, indexed by cell value - 1
pub const PROFESSOR_PALETTE: [[f32; 4]; 5] = [
    colors::HAIR,
    colors::SKIN,
    colors::SHIRT,
    colors::TIE,
    colors::SUIT,
];

/// Number of opaque cells in the sprite
pub fn professor_pixel_count() -> usize {
    PROFESSOR
        .iter()
        .flat_map(|row| row.iter())
        .filter(|&&cell| cell != 0)
        .count()
}

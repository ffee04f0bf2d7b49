//! Directional key sampler
//!
//! Browser key events write into it; the simulation reads it once per tick.

use serde::{Deserialize, Serialize};

/// One of the four movement controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Map a DOM `KeyboardEvent.code` to a direction
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// Held state of the four directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSampler {
    held: [bool; 4],
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key down. Returns whether the code was a movement key.
    pub fn press(&mut self, code: &str) -> bool {
        self.update(code, true)
    }

    /// Key up. Returns whether the code was a movement key.
    pub fn release(&mut self, code: &str) -> bool {
        self.update(code, false)
    }

    fn update(&mut self, code: &str, held: bool) -> bool {
        match Direction::from_code(code) {
            Some(dir) => {
                self.set(dir, held);
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, dir: Direction, held: bool) {
        self.held[dir.index()] = held;
    }

    #[inline]
    pub fn is_held(&self, dir: Direction) -> bool {
        self.held[dir.index()]
    }

    /// Release everything (restart, window blur)
    pub fn clear(&mut self) {
        self.held = [false; 4];
    }

    pub fn any_held(&self) -> bool {
        self.held.iter().any(|&h| h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputSampler::new();
        assert!(input.press("ArrowLeft"));
        assert!(input.is_held(Direction::Left));
        assert!(!input.is_held(Direction::Right));

        assert!(input.release("ArrowLeft"));
        assert!(!input.is_held(Direction::Left));
    }

    #[test]
    fn test_unknown_codes_are_ignored() {
        let mut input = InputSampler::new();
        assert!(!input.press("KeyW"));
        assert!(!input.press("Space"));
        assert!(!input.release("Escape"));
        assert_eq!(input, InputSampler::default());
    }

    #[test]
    fn test_all_codes_map() {
        for (code, dir) in [
            ("ArrowUp", Direction::Up),
            ("ArrowDown", Direction::Down),
            ("ArrowLeft", Direction::Left),
            ("ArrowRight", Direction::Right),
        ] {
            assert_eq!(Direction::from_code(code), Some(dir));
        }
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut input = InputSampler::new();
        for dir in Direction::ALL {
            input.set(dir, true);
        }
        assert!(input.any_held());
        input.clear();
        assert!(!input.any_held());
    }

    #[test]
    fn test_repeat_press_is_idempotent() {
        let mut input = InputSampler::new();
        input.press("ArrowUp");
        input.press("ArrowUp");
        input.release("ArrowUp");
        assert!(!input.is_held(Direction::Up));
    }
}

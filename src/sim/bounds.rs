//! Drawing surface bounds

use serde::{Deserialize, Serialize};

use super::SimError;

/// Size of the play surface in pixels. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    width: u32,
    height: u32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidBounds {
                width: width as f64,
                height: height as f64,
            });
        }
        Ok(Self { width, height })
    }

    /// Build from host-reported sizes (CSS pixels, may be fractional or garbage)
    pub fn from_host(width: f64, height: f64) -> Result<Self, SimError> {
        let valid = |v: f64| v.is_finite() && v >= 1.0 && v <= u32::MAX as f64;
        if !valid(width) || !valid(height) {
            return Err(SimError::InvalidBounds { width, height });
        }
        Self::new(width as u32, height as u32)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width as f32
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height as f32
    }

    /// Raw pixel size
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

//! Plain RGBA color in the 0.0 - 1.0 range.

use serde::{Deserialize, Serialize};

/// Channels below this are treated as zero when testing for black.
const BLACK_EPSILON: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from an `[r, g, b]` triple as stored in config.
    pub fn from_rgb(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], 1.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Multiply the alpha channel, leaving color untouched.
    pub fn scale_alpha(self, factor: f32) -> Self {
        Self {
            a: self.a * factor,
            ..self
        }
    }

    /// True when all color channels are zero, ignoring alpha.
    pub fn is_black(&self) -> bool {
        self.r.abs() < BLACK_EPSILON && self.g.abs() < BLACK_EPSILON && self.b.abs() < BLACK_EPSILON
    }

    /// Convert to `[u8; 4]` for rasterizers.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_black_ignores_alpha() {
        assert!(Rgba::BLACK.is_black());
        assert!(Rgba::TRANSPARENT.is_black());
        assert!(!Rgba::WHITE.is_black());
        assert!(!Rgba::new(0.0, 0.0, 0.2, 0.0).is_black());
    }

    #[test]
    fn test_to_rgba8_clamps() {
        assert_eq!(Rgba::new(2.0, -1.0, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
    }
}

//! Common utility functions for overlay rendering

use dispel_types::Rgba;
use tiny_skia::Color;

/// Convert an engine color to a tiny_skia Color
#[inline]
pub fn color_from_rgba(rgba: Rgba) -> Color {
    let [r, g, b, a] = rgba.to_rgba8();
    Color::from_rgba8(r, g, b, a)
}

/// Component-wise product of two colors (tinting a texture).
pub fn modulate(base: Rgba, tint: Rgba) -> Rgba {
    Rgba::new(base.r * tint.r, base.g * tint.g, base.b * tint.b, base.a * tint.a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_rgba() {
        let c = color_from_rgba(Rgba::new(1.0, 0.0, 0.0, 0.5));
        let u = c.to_color_u8();
        assert_eq!((u.red(), u.green(), u.blue(), u.alpha()), (255, 0, 0, 128));
    }

    #[test]
    fn test_modulate_white_is_identity() {
        let c = Rgba::new(0.2, 0.4, 0.6, 0.8);
        assert_eq!(modulate(c, Rgba::WHITE), c);
    }
}

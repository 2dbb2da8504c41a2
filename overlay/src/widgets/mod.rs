//! Overlay sub-element widgets
//!
//! Two widget kinds make up every overlay node:
//!
//! - [`StatusBar`] - protected-value-safe bar. Accepts opaque colors and has
//!   a separate alpha multiplier, so opacity can change without touching
//!   the paint.
//! - [`Texture`] - plain directional texture. Opacity is part of the tint,
//!   so any opacity change means re-applying tint and blend mode together.

mod status_bar;
mod texture;

pub use status_bar::StatusBar;
pub use texture::Texture;

use dispel_types::Rgba;

use crate::host::OpaqueColor;

/// Paint source for a widget.
#[derive(Debug, Clone)]
pub enum Paint {
    Plain(Rgba),
    Opaque(OpaqueColor),
}

impl Paint {
    pub(crate) fn resolve(&self) -> Rgba {
        match self {
            Paint::Plain(color) => *color,
            Paint::Opaque(color) => color.reveal(),
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Plain(Rgba::TRANSPARENT)
    }
}

/// One side of a frame. Also names the edge a fade texture is solid at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Widget rectangle relative to the frame's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

//! Plain tinted texture

use dispel_types::BlendMode;

use super::{Paint, Rect, Side};

/// A tinted texture. Opacity lives in the tint, so there is no separate
/// alpha multiplier: changing opacity means calling [`Texture::set_tint`]
/// again with paint, alpha and blend mode.
#[derive(Debug, Clone)]
pub struct Texture {
    rect: Rect,
    shown: bool,
    paint: Paint,
    tint_alpha: f32,
    blend: BlendMode,
    fade: Option<Side>,
    tint_writes: u64,
}

impl Default for Texture {
    fn default() -> Self {
        Self {
            rect: Rect::default(),
            shown: false,
            paint: Paint::default(),
            tint_alpha: 1.0,
            blend: BlendMode::Blend,
            fade: None,
            tint_writes: 0,
        }
    }
}

impl Texture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture authored with a fade that is solid at `side`.
    pub fn with_fade(side: Side) -> Self {
        Self {
            fade: Some(side),
            ..Self::default()
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn show(&mut self) {
        self.shown = true;
    }

    pub fn hide(&mut self) {
        self.shown = false;
    }

    pub fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Apply tint color, tint alpha and blend mode in one call.
    pub fn set_tint(&mut self, paint: Paint, alpha: f32, blend: BlendMode) {
        self.paint = paint;
        self.tint_alpha = alpha;
        self.blend = blend;
        self.tint_writes += 1;
    }

    pub(crate) fn paint(&self) -> &Paint {
        &self.paint
    }

    pub fn tint_alpha(&self) -> f32 {
        self.tint_alpha
    }

    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    pub fn fade(&self) -> Option<Side> {
        self.fade
    }

    /// Number of `set_tint` calls so far.
    pub fn tint_writes(&self) -> u64 {
        self.tint_writes
    }

    pub(crate) fn effective_alpha(&self) -> f32 {
        self.paint.resolve().a * self.tint_alpha
    }
}

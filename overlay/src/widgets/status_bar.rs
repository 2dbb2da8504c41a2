//! Protected-value-safe status bar

use dispel_types::BlendMode;

use super::{Orientation, Paint, Rect, Side};

/// A fillable bar that accepts opaque colors.
#[derive(Debug, Clone)]
pub struct StatusBar {
    rect: Rect,
    shown: bool,
    paint: Paint,
    alpha: f32,
    blend: BlendMode,
    fade: Option<Side>,
    orientation: Orientation,
    reverse_fill: bool,
    min: f32,
    max: f32,
    value: f32,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self {
            rect: Rect::default(),
            shown: false,
            paint: Paint::default(),
            alpha: 1.0,
            blend: BlendMode::Blend,
            fade: None,
            orientation: Orientation::Horizontal,
            reverse_fill: false,
            min: 0.0,
            max: 1.0,
            value: 1.0,
        }
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
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

    pub fn set_color(&mut self, paint: Paint) {
        self.paint = paint;
    }

    pub(crate) fn paint(&self) -> &Paint {
        &self.paint
    }

    /// Alpha multiplier applied on top of the paint.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_blend(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    /// Side the fill is solid at; `None` for a flat fill.
    pub fn set_fade(&mut self, fade: Option<Side>) {
        self.fade = fade;
    }

    pub fn fade(&self) -> Option<Side> {
        self.fade
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_reverse_fill(&mut self, reverse: bool) {
        self.reverse_fill = reverse;
    }

    pub fn reverse_fill(&self) -> bool {
        self.reverse_fill
    }

    pub fn set_min_max(&mut self, min: f32, max: f32) {
        self.min = min;
        self.max = max;
    }

    pub fn min_max(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Filled fraction, 0.0 - 1.0. A zero-width range counts as empty.
    pub fn fill_fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.value - self.min) / span).clamp(0.0, 1.0)
    }

    /// Rectangle actually covered by the fill.
    pub fn fill_rect(&self) -> Rect {
        let f = self.fill_fraction();
        let r = self.rect;
        match (self.orientation, self.reverse_fill) {
            (Orientation::Horizontal, false) => Rect::new(r.x, r.y, r.w * f, r.h),
            (Orientation::Horizontal, true) => Rect::new(r.right() - r.w * f, r.y, r.w * f, r.h),
            // Vertical bars grow upward unless reversed.
            (Orientation::Vertical, false) => Rect::new(r.x, r.bottom() - r.h * f, r.w, r.h * f),
            (Orientation::Vertical, true) => Rect::new(r.x, r.y, r.w, r.h * f),
        }
    }

    /// Paint alpha times the multiplier.
    pub(crate) fn effective_alpha(&self) -> f32 {
        self.paint.resolve().a * self.alpha
    }
}

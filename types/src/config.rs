//! Style configuration for the dispel overlay.
//!
//! Every struct is `#[serde(default)]`, so a partial or hand-edited file
//! fills any missing field from [`Default`].

use serde::{Deserialize, Serialize};

use crate::{Category, Rgba};

// ─────────────────────────────────────────────────────────────────────────────
// Enums
// ─────────────────────────────────────────────────────────────────────────────

/// Gradient layout. The six layouts are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GradientStyle {
    /// Fills the whole frame
    #[default]
    Full,
    /// Four segments, one per edge, fading inward
    Edge,
    Top,
    Bottom,
    Left,
    Right,
}

/// Blend mode used for gradient and edge textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BlendMode {
    /// Standard alpha blending
    Blend,
    /// Additive
    #[default]
    Add,
}

/// Anchor point of the category icon within the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconPosition {
    TopLeft,
    Top,
    TopRight,
    Left,
    #[default]
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl IconPosition {
    /// Anchor as a fraction of frame width/height (0,0 = top-left).
    pub fn anchor(self) -> (f32, f32) {
        match self {
            IconPosition::TopLeft => (0.0, 0.0),
            IconPosition::Top => (0.5, 0.0),
            IconPosition::TopRight => (1.0, 0.0),
            IconPosition::Left => (0.0, 0.5),
            IconPosition::Center => (0.5, 0.5),
            IconPosition::Right => (1.0, 0.5),
            IconPosition::BottomLeft => (0.0, 1.0),
            IconPosition::Bottom => (0.5, 1.0),
            IconPosition::BottomRight => (1.0, 1.0),
        }
    }
}

/// Which roster display a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayContext {
    #[default]
    Party,
    Raid,
}

// ─────────────────────────────────────────────────────────────────────────────
// Category colors
// ─────────────────────────────────────────────────────────────────────────────

/// User-configured base color (RGB, 0-1) per category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryColors {
    pub magic: [f32; 3],
    pub curse: [f32; 3],
    pub disease: [f32; 3],
    pub poison: [f32; 3],
    pub bleed: [f32; 3],
    pub enrage: [f32; 3],
}

impl Default for CategoryColors {
    fn default() -> Self {
        Self {
            magic: [0.2, 0.6, 1.0],
            curse: [0.6, 0.0, 1.0],
            disease: [0.6, 0.4, 0.0],
            poison: [0.0, 0.6, 0.0],
            bleed: [1.0, 0.0, 0.0],
            enrage: [1.0, 0.45, 0.0],
        }
    }
}

impl CategoryColors {
    /// Opaque base color for a category. `None` is fully transparent.
    pub fn color(&self, category: Category) -> Rgba {
        let rgb = match category {
            Category::None => return Rgba::TRANSPARENT,
            Category::Magic => self.magic,
            Category::Curse => self.curse,
            Category::Disease => self.disease,
            Category::Poison => self.poison,
            Category::Bleed => self.bleed,
            Category::Enrage => self.enrage,
        };
        Rgba::from_rgb(rgb)
    }

    /// Look up by lowercase category name, as used by preview data and the
    /// settings UI. Unknown names resolve to transparent.
    pub fn by_name(&self, name: &str) -> Rgba {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .map(|c| self.color(c))
            .unwrap_or(Rgba::TRANSPARENT)
    }

    /// Mutable slot for a category (settings writes only).
    pub fn slot_mut(&mut self, category: Category) -> Option<&mut [f32; 3]> {
        match category {
            Category::None => None,
            Category::Magic => Some(&mut self.magic),
            Category::Curse => Some(&mut self.curse),
            Category::Disease => Some(&mut self.disease),
            Category::Poison => Some(&mut self.poison),
            Category::Bleed => Some(&mut self.bleed),
            Category::Enrage => Some(&mut self.enrage),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Style config
// ─────────────────────────────────────────────────────────────────────────────

pub const GRADIENT_SIZE_MIN: f32 = 0.05;
pub const GRADIENT_SIZE_MAX: f32 = 1.0;
pub const ICON_SIZE_MIN: f32 = 4.0;
pub const ICON_SIZE_MAX: f32 = 64.0;

/// Complete style configuration for the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Feature switch for party frames
    pub enabled_party: bool,
    /// Feature switch for raid frames
    pub enabled_raid: bool,

    pub colors: CategoryColors,

    pub border_alpha: f32,
    pub gradient_alpha: f32,
    /// Multiplier on `gradient_alpha`; the product is capped at 1.0
    pub gradient_intensity: f32,
    pub icon_alpha: f32,

    pub gradient_style: GradientStyle,
    /// Fraction of the frame dimension covered by directional/edge gradients
    pub gradient_size: f32,
    pub gradient_blend: BlendMode,
    pub darken_enabled: bool,
    pub darken_alpha: f32,

    pub icon_size: f32,
    pub icon_position: IconPosition,
    pub icon_offset_x: f32,
    pub icon_offset_y: f32,

    pub border_size: f32,
    /// Outward offset of the border from the frame bounds (negative = inward)
    pub border_inset: f32,

    pub animate: bool,
    pub pulse_period_secs: f32,

    /// Gradient mirrors the health bar (only meaningful for `FULL`)
    pub track_health: bool,

    /// Out-of-range attenuation toggle
    pub range_fade: bool,
    /// Alpha multiplier applied while out of range
    pub oor_alpha: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            enabled_party: true,
            enabled_raid: true,
            colors: CategoryColors::default(),
            border_alpha: 1.0,
            gradient_alpha: 0.6,
            gradient_intensity: 1.0,
            icon_alpha: 1.0,
            gradient_style: GradientStyle::Full,
            gradient_size: 0.35,
            gradient_blend: BlendMode::Add,
            darken_enabled: false,
            darken_alpha: 0.5,
            icon_size: 16.0,
            icon_position: IconPosition::Center,
            icon_offset_x: 0.0,
            icon_offset_y: 0.0,
            border_size: 2.0,
            border_inset: 0.0,
            animate: false,
            pulse_period_secs: 1.0,
            track_health: false,
            range_fade: true,
            oor_alpha: 0.4,
        }
    }
}

impl StyleConfig {
    /// Whether the overlay is switched on for frames of this context.
    pub fn enabled_for(&self, context: DisplayContext) -> bool {
        match context {
            DisplayContext::Party => self.enabled_party,
            DisplayContext::Raid => self.enabled_raid,
        }
    }

    /// Gradient alpha after intensity, capped at 1.0.
    pub fn effective_gradient_alpha(&self) -> f32 {
        (self.gradient_alpha * self.gradient_intensity).min(1.0)
    }

    /// Health tracking only applies to the `FULL` layout.
    pub fn tracks_health(&self) -> bool {
        self.track_health && self.gradient_style == GradientStyle::Full
    }

    /// Attenuation multiplier for the given range state.
    pub fn range_multiplier(&self, in_range: bool) -> f32 {
        if self.range_fade && !in_range {
            self.oor_alpha
        } else {
            1.0
        }
    }

    /// Whether the bleed/enrage fallback scan is worth running at all.
    pub fn scan_fallback_enabled(&self) -> bool {
        Category::SCAN_ONLY
            .into_iter()
            .any(|c| !self.colors.color(c).is_black())
    }

    /// Copy with every numeric field clamped into its valid range.
    pub fn validated(&self) -> Self {
        let unit = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 };
        let finite_or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        let defaults = Self::default();
        let mut cfg = self.clone();
        cfg.border_alpha = unit(cfg.border_alpha);
        cfg.gradient_alpha = unit(cfg.gradient_alpha);
        cfg.gradient_intensity = if cfg.gradient_intensity.is_finite() {
            cfg.gradient_intensity.max(0.0)
        } else {
            1.0
        };
        cfg.icon_alpha = unit(cfg.icon_alpha);
        cfg.darken_alpha = unit(cfg.darken_alpha);
        cfg.oor_alpha = unit(cfg.oor_alpha);
        cfg.gradient_size = finite_or(cfg.gradient_size, defaults.gradient_size)
            .clamp(GRADIENT_SIZE_MIN, GRADIENT_SIZE_MAX);
        cfg.icon_size =
            finite_or(cfg.icon_size, defaults.icon_size).clamp(ICON_SIZE_MIN, ICON_SIZE_MAX);
        cfg.border_size = finite_or(cfg.border_size, defaults.border_size).max(0.0);
        cfg.border_inset = finite_or(cfg.border_inset, defaults.border_inset);
        cfg.icon_offset_x = finite_or(cfg.icon_offset_x, defaults.icon_offset_x);
        cfg.icon_offset_y = finite_or(cfg.icon_offset_y, defaults.icon_offset_y);
        if !cfg.pulse_period_secs.is_finite() || cfg.pulse_period_secs <= 0.0 {
            cfg.pulse_period_secs = defaults.pulse_period_secs;
        }
        for category in Category::ALL {
            if let Some(rgb) = cfg.colors.slot_mut(category) {
                for channel in rgb.iter_mut() {
                    *channel = unit(*channel);
                }
            }
        }
        cfg
    }
}

//! Per-frame overlay node
//!
//! Every sub-element a frame's overlay can show, created together on first
//! need and reused for the lifetime of the frame.

use dispel_core::{EffectHandle, IconSlot};
use dispel_types::Category;

use super::pulse::PulseAnimation;
use crate::frame::FrameGeometry;
use crate::widgets::{Side, StatusBar, Texture};

/// How the shown category reached the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Colors came from the host resolver; the category is never known here.
    Opaque { handle: EffectHandle },
    /// Colors came from the config color table.
    Raw { category: Category },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeState {
    #[default]
    Hidden,
    Shown { mode: DisplayMode, in_range: bool },
}

/// Inputs of the last layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LayoutStamp {
    pub generation: u64,
    pub geometry: FrameGeometry,
}

/// Border, gradient, edge, icon and pulse elements of one frame's overlay.
#[derive(Debug, Clone)]
pub struct OverlayNode {
    pub(crate) borders: [StatusBar; 4],
    pub(crate) gradient: StatusBar,
    pub(crate) darken: Texture,
    pub(crate) edges: [Texture; 4],
    pub(crate) icons: [Texture; 5],
    pub(crate) pulse: PulseAnimation,
    pub(crate) alpha: f32,
    pub(crate) state: NodeState,
    /// Whether the resolver produced a gradient paint for the current show
    pub(crate) gradient_available: bool,
    pub(crate) layout: Option<LayoutStamp>,
    pub(crate) layout_passes: u64,
}

impl Default for OverlayNode {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayNode {
    pub fn new() -> Self {
        Self {
            borders: Default::default(),
            gradient: StatusBar::new(),
            darken: Texture::new(),
            edges: Side::ALL.map(Texture::with_fade),
            icons: Default::default(),
            pulse: PulseAnimation::default(),
            alpha: 1.0,
            state: NodeState::Hidden,
            gradient_available: false,
            layout: None,
            layout_passes: 0,
        }
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn is_shown(&self) -> bool {
        matches!(self.state, NodeState::Shown { .. })
    }

    /// Overlay-wide alpha, driven by the pulse.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn border(&self, side: Side) -> &StatusBar {
        &self.borders[side.index()]
    }

    pub fn gradient(&self) -> &StatusBar {
        &self.gradient
    }

    pub fn darken(&self) -> &Texture {
        &self.darken
    }

    pub fn edge(&self, side: Side) -> &Texture {
        &self.edges[side.index()]
    }

    pub fn icon(&self, slot: IconSlot) -> &Texture {
        &self.icons[slot.index()]
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse.is_playing()
    }

    /// Number of layout passes applied to this node.
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    pub fn visible_borders(&self) -> usize {
        self.borders.iter().filter(|b| b.is_shown()).count()
    }

    pub fn visible_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.is_shown()).count()
    }

    pub fn visible_icons(&self) -> Vec<IconSlot> {
        IconSlot::ALL
            .into_iter()
            .filter(|slot| self.icons[slot.index()].is_shown())
            .collect()
    }

    /// Hide every sub-element. Does not touch state or pulse.
    pub(crate) fn hide_elements(&mut self) {
        for bar in &mut self.borders {
            bar.hide();
        }
        self.gradient.hide();
        self.darken.hide();
        for edge in &mut self.edges {
            edge.hide();
        }
        for icon in &mut self.icons {
            icon.hide();
        }
    }
}

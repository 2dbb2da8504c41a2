//! Unit frame record
//!
//! `UnitFrame` is the roster tile the overlay decorates. The roster
//! subsystem creates and owns frames; the engine only reads their geometry
//! and owns the lazily created [`OverlayNode`] slot inside each one.

use dispel_core::UnitToken;
use dispel_types::DisplayContext;

use crate::overlays::OverlayNode;
use crate::widgets::{Orientation, Rect};

/// Orientation and fill direction of the frame's health bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HealthBarLayout {
    pub orientation: Orientation,
    pub reverse_fill: bool,
}

/// Live frame geometry the layout depends on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameGeometry {
    pub width: f32,
    pub height: f32,
    pub health_bar: HealthBarLayout,
}

impl FrameGeometry {
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// One roster tile.
#[derive(Debug)]
pub struct UnitFrame {
    pub unit: UnitToken,
    /// Position in the roster, used to key preview data
    pub slot: usize,
    pub context: DisplayContext,
    pub geometry: FrameGeometry,
    overlay: Option<OverlayNode>,
}

impl UnitFrame {
    pub fn new(
        unit: impl Into<UnitToken>,
        slot: usize,
        context: DisplayContext,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            unit: unit.into(),
            slot,
            context,
            geometry: FrameGeometry {
                width,
                height,
                health_bar: HealthBarLayout::default(),
            },
            overlay: None,
        }
    }

    pub fn with_health_bar(mut self, orientation: Orientation, reverse_fill: bool) -> Self {
        self.geometry.health_bar = HealthBarLayout {
            orientation,
            reverse_fill,
        };
        self
    }

    /// The overlay node, if it has been created.
    pub fn overlay(&self) -> Option<&OverlayNode> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut OverlayNode> {
        self.overlay.as_mut()
    }

    /// The overlay node, created on first use. Never recreated.
    pub fn ensure_overlay(&mut self) -> &mut OverlayNode {
        if self.overlay.is_none() {
            tracing::debug!(unit = %self.unit, slot = self.slot, "Creating overlay node");
        }
        self.overlay.get_or_insert_with(OverlayNode::new)
    }

    /// Unit, geometry and the (lazily created) node, borrowed together.
    pub(crate) fn parts_mut(&mut self) -> (&UnitToken, &FrameGeometry, &mut OverlayNode) {
        self.ensure_overlay();
        let node = self.overlay.get_or_insert_with(OverlayNode::new);
        (&self.unit, &self.geometry, node)
    }
}

/// A collection of live unit frames.
pub trait Roster {
    fn for_each_frame(&mut self, f: &mut dyn FnMut(&mut UnitFrame));
}

impl Roster for Vec<UnitFrame> {
    fn for_each_frame(&mut self, f: &mut dyn FnMut(&mut UnitFrame)) {
        for frame in self.iter_mut() {
            f(frame);
        }
    }
}

//! Layout engine
//!
//! Computes geometry for every sub-element of a node from the style config
//! and the frame's live geometry. Applying a layout is idempotent, so it is
//! safe to run on every visibility change.

use dispel_types::{GradientStyle, StyleConfig};

use super::node::{LayoutStamp, OverlayNode};
use crate::frame::FrameGeometry;
use crate::widgets::{Orientation, Rect, Side};

/// Recompute all geometry and re-sync gradient group visibility.
pub fn apply_layout(
    node: &mut OverlayNode,
    config: &StyleConfig,
    geometry: &FrameGeometry,
    generation: u64,
) {
    let bounds = geometry.bounds();

    for (side, rect) in Side::ALL.into_iter().zip(border_rects(
        bounds,
        config.border_size,
        config.border_inset,
    )) {
        node.borders[side.index()].set_rect(rect);
    }

    layout_gradient(node, config, geometry);

    let icon = icon_rect(config, bounds);
    for texture in &mut node.icons {
        texture.set_rect(icon);
    }

    sync_gradient_visibility(node, config);

    node.layout = Some(LayoutStamp {
        generation,
        geometry: *geometry,
    });
    node.layout_passes += 1;
}

/// Whether the node's geometry is stale for this config generation/frame.
pub fn needs_layout(node: &OverlayNode, geometry: &FrameGeometry, generation: u64) -> bool {
    node.layout
        != Some(LayoutStamp {
            generation,
            geometry: *geometry,
        })
}

/// Show exactly one gradient group for the configured style.
///
/// `EDGE` shows the four edge textures and hides the full bar and its
/// darken underlay; every other style does the opposite. Hidden nodes and
/// nodes without a gradient paint show neither.
pub(crate) fn sync_gradient_visibility(node: &mut OverlayNode, config: &StyleConfig) {
    let active = node.is_shown() && node.gradient_available;
    let edge = config.gradient_style == GradientStyle::Edge;

    for texture in &mut node.edges {
        texture.set_shown(active && edge);
    }
    node.gradient.set_shown(active && !edge);
    node.darken
        .set_shown(active && !edge && config.darken_enabled);
}

/// Hollow rectangle of `size` thickness, offset `inset` outward from
/// `bounds`. Order matches [`Side::ALL`]. Top and bottom are shortened by
/// `size` at each end so corners are not painted twice.
pub fn border_rects(bounds: Rect, size: f32, inset: f32) -> [Rect; 4] {
    let outer = Rect::new(
        bounds.x - inset,
        bounds.y - inset,
        bounds.w + inset * 2.0,
        bounds.h + inset * 2.0,
    );
    let span = (outer.w - size * 2.0).max(0.0);
    [
        Rect::new(outer.x + size, outer.y, span, size),
        Rect::new(outer.x + size, outer.bottom() - size, span, size),
        Rect::new(outer.x, outer.y, size, outer.h),
        Rect::new(outer.right() - size, outer.y, size, outer.h),
    ]
}

/// Rect of one edge texture: `fraction` of the frame dimension across the
/// edge, flush to it.
pub fn edge_rect(side: Side, fraction: f32, bounds: Rect) -> Rect {
    let dh = bounds.h * fraction;
    let dw = bounds.w * fraction;
    match side {
        Side::Top => Rect::new(bounds.x, bounds.y, bounds.w, dh),
        Side::Bottom => Rect::new(bounds.x, bounds.bottom() - dh, bounds.w, dh),
        Side::Left => Rect::new(bounds.x, bounds.y, dw, bounds.h),
        Side::Right => Rect::new(bounds.right() - dw, bounds.y, dw, bounds.h),
    }
}

/// Rect and fade side of the single gradient bar for non-edge styles.
pub fn gradient_rect(style: GradientStyle, fraction: f32, bounds: Rect) -> (Rect, Option<Side>) {
    let side = match style {
        GradientStyle::Full | GradientStyle::Edge => return (bounds, None),
        GradientStyle::Top => Side::Top,
        GradientStyle::Bottom => Side::Bottom,
        GradientStyle::Left => Side::Left,
        GradientStyle::Right => Side::Right,
    };
    (edge_rect(side, fraction, bounds), Some(side))
}

/// Shared icon rect: the icon's anchor point pinned to the same point on
/// the frame, then offset.
pub fn icon_rect(config: &StyleConfig, bounds: Rect) -> Rect {
    let (ax, ay) = config.icon_position.anchor();
    let size = config.icon_size;
    Rect::new(
        bounds.x + ax * bounds.w - ax * size + config.icon_offset_x,
        bounds.y + ay * bounds.h - ay * size + config.icon_offset_y,
        size,
        size,
    )
}

fn layout_gradient(node: &mut OverlayNode, config: &StyleConfig, geometry: &FrameGeometry) {
    let bounds = geometry.bounds();
    let fraction = config.gradient_size;

    for side in Side::ALL {
        node.edges[side.index()].set_rect(edge_rect(side, fraction, bounds));
    }

    let (rect, fade) = gradient_rect(config.gradient_style, fraction, bounds);
    let bar = &mut node.gradient;
    bar.set_rect(rect);
    bar.set_fade(fade);
    node.darken.set_rect(rect);

    if config.tracks_health() {
        // Value is pushed separately on every health change.
        bar.set_orientation(geometry.health_bar.orientation);
        bar.set_reverse_fill(geometry.health_bar.reverse_fill);
    } else {
        bar.set_orientation(Orientation::Horizontal);
        bar.set_reverse_fill(false);
        bar.set_min_max(0.0, 1.0);
        bar.set_value(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::HealthBarLayout;
    use dispel_types::IconPosition;

    fn geometry() -> FrameGeometry {
        FrameGeometry {
            width: 100.0,
            height: 40.0,
            health_bar: HealthBarLayout::default(),
        }
    }

    #[test]
    fn test_border_is_hollow_without_overlapping_corners() {
        let [top, bottom, left, right] =
            border_rects(Rect::new(0.0, 0.0, 100.0, 40.0), 2.0, 1.0);
        assert_eq!(left, Rect::new(-1.0, -1.0, 2.0, 42.0));
        assert_eq!(right, Rect::new(99.0, -1.0, 2.0, 42.0));
        assert_eq!(top, Rect::new(1.0, -1.0, 98.0, 2.0));
        assert_eq!(bottom, Rect::new(1.0, 39.0, 98.0, 2.0));
        // Top ends exactly where the side segments begin.
        assert_eq!(top.x, left.right());
        assert_eq!(top.right(), right.x);
    }

    #[test]
    fn test_directional_gradients_are_flush() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 40.0);
        assert_eq!(
            gradient_rect(GradientStyle::Top, 0.25, bounds),
            (Rect::new(0.0, 0.0, 100.0, 10.0), Some(Side::Top))
        );
        assert_eq!(
            gradient_rect(GradientStyle::Bottom, 0.25, bounds),
            (Rect::new(0.0, 30.0, 100.0, 10.0), Some(Side::Bottom))
        );
        assert_eq!(
            gradient_rect(GradientStyle::Left, 0.5, bounds),
            (Rect::new(0.0, 0.0, 50.0, 40.0), Some(Side::Left))
        );
        assert_eq!(
            gradient_rect(GradientStyle::Right, 0.5, bounds),
            (Rect::new(50.0, 0.0, 50.0, 40.0), Some(Side::Right))
        );
        assert_eq!(gradient_rect(GradientStyle::Full, 0.5, bounds), (bounds, None));
    }

    #[test]
    fn test_icon_anchor_and_offset() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 40.0);
        let mut config = StyleConfig {
            icon_size: 10.0,
            ..Default::default()
        };
        assert_eq!(icon_rect(&config, bounds), Rect::new(45.0, 15.0, 10.0, 10.0));

        config.icon_position = IconPosition::BottomRight;
        config.icon_offset_x = -2.0;
        config.icon_offset_y = -3.0;
        assert_eq!(icon_rect(&config, bounds), Rect::new(88.0, 27.0, 10.0, 10.0));
    }

    #[test]
    fn test_tracking_mirrors_health_bar() {
        let mut node = OverlayNode::new();
        let config = StyleConfig {
            track_health: true,
            ..Default::default()
        };
        let mut geo = geometry();
        geo.health_bar = HealthBarLayout {
            orientation: Orientation::Vertical,
            reverse_fill: true,
        };
        apply_layout(&mut node, &config, &geo, 0);
        assert_eq!(node.gradient().orientation(), Orientation::Vertical);
        assert!(node.gradient().reverse_fill());

        // Tracking off resets to a constant full bar.
        let config = StyleConfig::default();
        apply_layout(&mut node, &config, &geo, 1);
        assert_eq!(node.gradient().orientation(), Orientation::Horizontal);
        assert_eq!(node.gradient().fill_fraction(), 1.0);
    }

    #[test]
    fn test_layout_on_hidden_node_shows_nothing() {
        let mut node = OverlayNode::new();
        for style in [GradientStyle::Full, GradientStyle::Edge] {
            let config = StyleConfig {
                gradient_style: style,
                darken_enabled: true,
                ..Default::default()
            };
            apply_layout(&mut node, &config, &geometry(), 0);
            assert_eq!(node.visible_edges(), 0);
            assert!(!node.gradient().is_shown());
            assert!(!node.darken().is_shown());
        }
    }

    #[test]
    fn test_needs_layout_tracks_generation_and_geometry() {
        let mut node = OverlayNode::new();
        let geo = geometry();
        assert!(needs_layout(&node, &geo, 0));
        apply_layout(&mut node, &StyleConfig::default(), &geo, 0);
        assert!(!needs_layout(&node, &geo, 0));
        assert!(needs_layout(&node, &geo, 1));
        let wider = FrameGeometry {
            width: 120.0,
            ..geo
        };
        assert!(needs_layout(&node, &wider, 0));
    }
}

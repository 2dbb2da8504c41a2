//! Appearance applier
//!
//! Sets paint, opacity and visibility on a node's elements. Two entry
//! modes:
//!
//! - **Opaque**: every element's paint comes from the host resolver and a
//!   style curve. Visibility of icons is purely alpha driven, so nothing
//!   here ever branches on the category.
//! - **Raw**: the category is a plain value (preview data, bleed/enrage);
//!   colors come from the config table and icon visibility is an exact
//!   match.
//!
//! Range attenuation is always a post-multiply: bars take it through their
//! alpha multiplier, textures through a full tint re-apply.

use dispel_core::{EffectHandle, IconSlot, StyleCurve, StyleCurveCache, UnitToken};
use dispel_types::{BlendMode, Category, Rgba, StyleConfig};

use super::layout::sync_gradient_visibility;
use super::node::{DisplayMode, NodeState, OverlayNode};
use crate::host::ColorResolver;
use crate::widgets::{Paint, Texture};

/// Show using colors resolved by the host.
pub fn show_opaque(
    node: &mut OverlayNode,
    config: &StyleConfig,
    curves: &mut StyleCurveCache,
    resolver: &dyn ColorResolver,
    unit: &UnitToken,
    handle: EffectHandle,
    in_range: bool,
) {
    let resolve = |curve: &StyleCurve| {
        resolver
            .resolve_category_color(unit, handle, curve)
            .map(Paint::Opaque)
    };
    let border = resolve(curves.border_curve(config).as_ref());
    let gradient = resolve(curves.gradient_curve(config).as_ref());
    let icons = IconSlot::ALL.map(|slot| resolve(curves.icon_curve(slot, config).as_ref()));

    let m = config.range_multiplier(in_range);

    for bar in &mut node.borders {
        match &border {
            Some(paint) => {
                bar.set_color(paint.clone());
                bar.set_alpha(m);
                bar.show();
            }
            None => bar.hide(),
        }
    }

    node.gradient_available = gradient.is_some();
    if let Some(paint) = gradient {
        node.gradient.set_color(paint.clone());
        node.gradient.set_alpha(m);
        node.gradient.set_blend(config.gradient_blend);
        for edge in &mut node.edges {
            edge.set_tint(paint.clone(), m, config.gradient_blend);
        }
    }
    tint_darken(&mut node.darken, config, m);

    for (texture, paint) in node.icons.iter_mut().zip(icons) {
        match paint {
            Some(paint) => {
                texture.set_tint(paint, m, BlendMode::Blend);
                texture.show();
            }
            None => texture.hide(),
        }
    }

    node.state = NodeState::Shown {
        mode: DisplayMode::Opaque { handle },
        in_range,
    };
    sync_gradient_visibility(node, config);
    sync_pulse(node, config);
}

/// Show a plain category with colors from the config table.
pub fn show_raw(node: &mut OverlayNode, config: &StyleConfig, category: Category, in_range: bool) {
    let m = config.range_multiplier(in_range);
    let base = config.colors.color(category);
    let gradient_alpha = config.effective_gradient_alpha();

    let border = Paint::Plain(base.with_alpha(config.border_alpha * m));
    for bar in &mut node.borders {
        bar.set_color(border.clone());
        bar.set_alpha(1.0);
        bar.show();
    }

    node.gradient_available = true;
    node.gradient
        .set_color(Paint::Plain(base.with_alpha(gradient_alpha * m)));
    node.gradient.set_alpha(1.0);
    node.gradient.set_blend(config.gradient_blend);
    for edge in &mut node.edges {
        edge.set_tint(
            Paint::Plain(base.with_alpha(gradient_alpha)),
            m,
            config.gradient_blend,
        );
    }
    tint_darken(&mut node.darken, config, m);

    let target = IconSlot::for_category(category);
    for slot in IconSlot::ALL {
        let texture = &mut node.icons[slot.index()];
        if Some(slot) == target {
            texture.set_tint(Paint::Plain(Rgba::WHITE), config.icon_alpha * m, BlendMode::Blend);
            texture.show();
        } else {
            texture.hide();
        }
    }

    node.state = NodeState::Shown {
        mode: DisplayMode::Raw { category },
        in_range,
    };
    sync_gradient_visibility(node, config);
    sync_pulse(node, config);
}

/// Re-apply range attenuation without touching category or layout.
pub fn apply_range(node: &mut OverlayNode, config: &StyleConfig, in_range: bool) {
    let NodeState::Shown { mode, .. } = node.state else {
        return;
    };

    match mode {
        DisplayMode::Raw { category } => show_raw(node, config, category, in_range),
        DisplayMode::Opaque { .. } => {
            let m = config.range_multiplier(in_range);
            for bar in &mut node.borders {
                bar.set_alpha(m);
            }
            node.gradient.set_alpha(m);
            // Textures have no alpha multiplier: re-apply tint and blend.
            for edge in &mut node.edges {
                retint(edge, m, config.gradient_blend);
            }
            tint_darken(&mut node.darken, config, m);
            for icon in &mut node.icons {
                retint(icon, m, BlendMode::Blend);
            }
            node.state = NodeState::Shown { mode, in_range };
        }
    }
}

/// Push the current health value into a tracking gradient.
pub fn set_health_value(node: &mut OverlayNode, current: f32, max: f32) {
    node.gradient.set_min_max(0.0, max);
    node.gradient.set_value(current);
}

/// Hide everything and reset pulse and overlay alpha. Idempotent.
pub fn hide(node: &mut OverlayNode) {
    node.pulse.stop();
    node.alpha = 1.0;
    node.hide_elements();
    node.state = NodeState::Hidden;
}

/// Start or stop the pulse to match config. Never restarts a running pulse;
/// a running pulse only takes the new period.
pub fn sync_pulse(node: &mut OverlayNode, config: &StyleConfig) {
    if config.animate {
        if node.pulse.start(config.pulse_period_secs) {
            tracing::trace!("Pulse started");
        } else {
            node.pulse.set_period(config.pulse_period_secs);
        }
    } else {
        node.pulse.stop();
        node.alpha = 1.0;
    }
}

fn tint_darken(darken: &mut Texture, config: &StyleConfig, m: f32) {
    darken.set_tint(Paint::Plain(Rgba::BLACK), config.darken_alpha * m, BlendMode::Blend);
}

fn retint(texture: &mut Texture, alpha: f32, blend: BlendMode) {
    let paint = texture.paint().clone();
    texture.set_tint(paint, alpha, blend);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Side;

    const EPS: f32 = 1e-5;

    fn shown_node(category: Category, config: &StyleConfig, in_range: bool) -> OverlayNode {
        let mut node = OverlayNode::new();
        show_raw(&mut node, config, category, in_range);
        node
    }

    #[test]
    fn test_raw_attenuation_composes() {
        let config = StyleConfig {
            border_alpha: 0.8,
            oor_alpha: 0.5,
            ..Default::default()
        };
        let near = shown_node(Category::Magic, &config, true);
        let far = shown_node(Category::Magic, &config, false);
        assert!((near.border(Side::Top).effective_alpha() - 0.8).abs() < EPS);
        assert!((far.border(Side::Top).effective_alpha() - 0.4).abs() < EPS);

        let g = config.effective_gradient_alpha();
        assert!((far.gradient().effective_alpha() - g * 0.5).abs() < EPS);
        assert!((far.edge(Side::Left).effective_alpha() - g * 0.5).abs() < EPS);
    }

    #[test]
    fn test_raw_icons_match_exactly() {
        let config = StyleConfig::default();
        let node = shown_node(Category::Enrage, &config, true);
        assert_eq!(node.visible_icons(), vec![IconSlot::Bleed]);

        let node = shown_node(Category::Disease, &config, true);
        assert_eq!(node.visible_icons(), vec![IconSlot::Disease]);
    }

    #[test]
    fn test_raw_range_change_reapplies_from_table() {
        let config = StyleConfig {
            oor_alpha: 0.25,
            ..Default::default()
        };
        let mut node = shown_node(Category::Bleed, &config, true);
        apply_range(&mut node, &config, false);
        assert!((node.border(Side::Right).effective_alpha() - 0.25).abs() < EPS);
        assert_eq!(
            node.state(),
            NodeState::Shown {
                mode: DisplayMode::Raw {
                    category: Category::Bleed
                },
                in_range: false,
            }
        );
    }

    #[test]
    fn test_hide_twice_matches_hide_once() {
        let config = StyleConfig {
            animate: true,
            darken_enabled: true,
            ..Default::default()
        };
        let mut node = shown_node(Category::Poison, &config, true);
        node.alpha = 0.5;

        hide(&mut node);
        let once = (
            node.state(),
            node.alpha(),
            node.visible_borders(),
            node.visible_icons(),
            node.is_pulsing(),
        );
        hide(&mut node);
        let twice = (
            node.state(),
            node.alpha(),
            node.visible_borders(),
            node.visible_icons(),
            node.is_pulsing(),
        );

        assert_eq!(once, twice);
        assert_eq!(twice.0, NodeState::Hidden);
        assert_eq!(twice.1, 1.0);
        assert_eq!(twice.2, 0);
        assert!(twice.3.is_empty());
        assert!(!twice.4);
        assert!(!node.gradient().is_shown());
        assert!(!node.darken().is_shown());
    }

    #[test]
    fn test_pulse_follows_config() {
        let mut config = StyleConfig {
            animate: true,
            ..Default::default()
        };
        let mut node = shown_node(Category::Curse, &config, true);
        assert!(node.is_pulsing());

        node.alpha = 0.6;
        config.animate = false;
        sync_pulse(&mut node, &config);
        assert!(!node.is_pulsing());
        assert_eq!(node.alpha(), 1.0);
    }
}

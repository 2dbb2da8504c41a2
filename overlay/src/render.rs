//! Software rasterizer for overlay nodes
//!
//! Paints frames and their overlay elements with tiny-skia. This is the one
//! place opaque colors are turned back into pixels.

use std::path::{Path, PathBuf};

use dispel_core::IconSlot;
use dispel_types::{BlendMode, Rgba};
use thiserror::Error;
use tiny_skia::{
    GradientStop, LinearGradient, Paint, Pixmap, Point, SpreadMode, Transform,
};

use crate::frame::UnitFrame;
use crate::utils::{color_from_rgba, modulate};
use crate::widgets::{Rect, Side, StatusBar, Texture};

const BACKGROUND: Rgba = Rgba::new(0.08, 0.08, 0.08, 1.0);
const FRAME_BACKGROUND: Rgba = Rgba::new(0.12, 0.12, 0.12, 1.0);
const CELL_PADDING: f32 = 8.0;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("failed to encode PNG: {0}")]
    Encode(String),
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Stand-in artwork color for each icon; the tint multiplies it.
fn icon_swatch(slot: IconSlot) -> Rgba {
    match slot {
        IconSlot::Magic => Rgba::new(0.35, 0.65, 1.0, 1.0),
        IconSlot::Curse => Rgba::new(0.7, 0.3, 1.0, 1.0),
        IconSlot::Disease => Rgba::new(0.75, 0.55, 0.2, 1.0),
        IconSlot::Poison => Rgba::new(0.3, 0.85, 0.3, 1.0),
        IconSlot::Bleed => Rgba::new(0.95, 0.2, 0.2, 1.0),
    }
}

/// Paint one frame and its overlay at `(ox, oy)`.
pub fn rasterize(frame: &UnitFrame, pixmap: &mut Pixmap, ox: f32, oy: f32) {
    let g = &frame.geometry;
    fill(
        pixmap,
        Rect::new(ox, oy, g.width, g.height),
        FRAME_BACKGROUND,
        BlendMode::Blend,
        None,
    );

    let Some(node) = frame.overlay() else {
        return;
    };
    if !node.is_shown() {
        return;
    }
    let alpha = node.alpha();

    draw_texture(pixmap, node.darken(), None, alpha, ox, oy);
    draw_bar(pixmap, node.gradient(), alpha, ox, oy);
    for side in Side::ALL {
        draw_texture(pixmap, node.edge(side), None, alpha, ox, oy);
    }
    for side in Side::ALL {
        draw_bar(pixmap, node.border(side), alpha, ox, oy);
    }
    for slot in IconSlot::ALL {
        draw_texture(pixmap, node.icon(slot), Some(icon_swatch(slot)), alpha, ox, oy);
    }
}

/// Lay frames out in a grid and paint them onto a new pixmap.
pub fn render_roster(frames: &[UnitFrame], columns: usize) -> Result<Pixmap, RenderError> {
    let columns = columns.max(1);
    let rows = frames.len().div_ceil(columns).max(1);
    let cell_w = frames.iter().map(|f| f.geometry.width).fold(0.0, f32::max) + CELL_PADDING;
    let cell_h = frames.iter().map(|f| f.geometry.height).fold(0.0, f32::max) + CELL_PADDING;

    let width = (cell_w * columns as f32 + CELL_PADDING).ceil() as u32;
    let height = (cell_h * rows as f32 + CELL_PADDING).ceil() as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
    pixmap.fill(color_from_rgba(BACKGROUND));

    for (i, frame) in frames.iter().enumerate() {
        let x = CELL_PADDING + (i % columns) as f32 * cell_w;
        let y = CELL_PADDING + (i / columns) as f32 * cell_h;
        rasterize(frame, &mut pixmap, x, y);
    }
    Ok(pixmap)
}

/// Render a roster and write it as PNG.
pub fn render_roster_png(
    frames: &[UnitFrame],
    columns: usize,
    path: &Path,
) -> Result<(), RenderError> {
    let pixmap = render_roster(frames, columns)?;
    let data = pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    std::fs::write(path, data).map_err(|e| RenderError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn draw_bar(pixmap: &mut Pixmap, bar: &StatusBar, node_alpha: f32, ox: f32, oy: f32) {
    if !bar.is_shown() {
        return;
    }
    let color = bar
        .paint()
        .resolve()
        .with_alpha(bar.effective_alpha() * node_alpha);
    fill(pixmap, offset(bar.fill_rect(), ox, oy), color, bar.blend(), bar.fade());
}

fn draw_texture(
    pixmap: &mut Pixmap,
    texture: &Texture,
    artwork: Option<Rgba>,
    node_alpha: f32,
    ox: f32,
    oy: f32,
) {
    if !texture.is_shown() {
        return;
    }
    let tint = texture
        .paint()
        .resolve()
        .with_alpha(texture.effective_alpha() * node_alpha);
    let color = artwork.map_or(tint, |base| modulate(base, tint));
    fill(pixmap, offset(texture.rect(), ox, oy), color, texture.blend(), texture.fade());
}

fn offset(rect: Rect, ox: f32, oy: f32) -> Rect {
    Rect::new(rect.x + ox, rect.y + oy, rect.w, rect.h)
}

fn fill(pixmap: &mut Pixmap, rect: Rect, color: Rgba, blend: BlendMode, fade: Option<Side>) {
    if color.a <= 0.0 {
        return;
    }
    let Some(sk_rect) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.w, rect.h) else {
        return;
    };

    let mut paint = Paint {
        anti_alias: false,
        blend_mode: match blend {
            BlendMode::Blend => tiny_skia::BlendMode::SourceOver,
            BlendMode::Add => tiny_skia::BlendMode::Plus,
        },
        ..Paint::default()
    };

    let solid = color_from_rgba(color);
    match fade.and_then(|side| fade_shader(side, rect, color)) {
        Some(shader) => paint.shader = shader,
        None => paint.set_color(solid),
    }

    pixmap.fill_rect(sk_rect, &paint, Transform::identity(), None);
}

/// Linear fade, solid at `side` and transparent at the opposite edge.
fn fade_shader(side: Side, rect: Rect, color: Rgba) -> Option<tiny_skia::Shader<'static>> {
    let (start, end) = match side {
        Side::Top => ((rect.x, rect.y), (rect.x, rect.bottom())),
        Side::Bottom => ((rect.x, rect.bottom()), (rect.x, rect.y)),
        Side::Left => ((rect.x, rect.y), (rect.right(), rect.y)),
        Side::Right => ((rect.right(), rect.y), (rect.x, rect.y)),
    };
    LinearGradient::new(
        Point::from_xy(start.0, start.1),
        Point::from_xy(end.0, end.1),
        vec![
            GradientStop::new(0.0, color_from_rgba(color)),
            GradientStop::new(1.0, color_from_rgba(color.with_alpha(0.0))),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlays::appearance;
    use crate::overlays::layout::apply_layout;
    use dispel_types::{Category, DisplayContext, StyleConfig};

    fn bleeding_frame(config: &StyleConfig) -> UnitFrame {
        let mut frame = UnitFrame::new("party1", 0, DisplayContext::Party, 80.0, 40.0);
        let geometry = frame.geometry;
        let node = frame.ensure_overlay();
        appearance::show_raw(node, config, Category::Bleed, true);
        apply_layout(node, config, &geometry, 0);
        frame
    }

    #[test]
    fn test_shown_overlay_tints_frame() {
        let config = StyleConfig::default();
        let frame = bleeding_frame(&config);
        let pixmap = render_roster(std::slice::from_ref(&frame), 1).unwrap();

        // Inside the frame, clear of border and centered icon.
        let x = (CELL_PADDING + 10.0) as u32;
        let y = (CELL_PADDING + 10.0) as u32;
        let px = pixmap.pixel(x, y).unwrap();
        assert!(px.red() > px.green() + 40, "expected red tint, got {px:?}");
    }

    #[test]
    fn test_hidden_overlay_paints_only_background() {
        let config = StyleConfig::default();
        let mut frame = bleeding_frame(&config);
        if let Some(node) = frame.overlay_mut() {
            appearance::hide(node);
        }
        let pixmap = render_roster(std::slice::from_ref(&frame), 1).unwrap();
        let px = pixmap
            .pixel((CELL_PADDING + 10.0) as u32, (CELL_PADDING + 10.0) as u32)
            .unwrap();
        assert_eq!(px.red(), px.green());
        assert_eq!(px.green(), px.blue());
    }

    #[test]
    fn test_empty_roster_still_renders() {
        let pixmap = render_roster(&[], 4).unwrap();
        assert!(pixmap.width() > 0 && pixmap.height() > 0);
    }
}

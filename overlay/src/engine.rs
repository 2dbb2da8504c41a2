//! Overlay state machine
//!
//! Decides, per frame and per update, whether the overlay is hidden or
//! shown and from which data source, then drives layout and appearance.
//!
//! ```text
//!            ┌──────────────┐  first show   ┌────────┐
//!            │Uninitialized │──────────────▶│ Shown  │
//!            └──────────────┘               └────────┘
//!                                             ▲    │
//!                              category found │    │ nothing to show
//!                                             │    ▼
//!                                           ┌────────┐
//!                                           │ Hidden │
//!                                           └────────┘
//! ```
//!
//! A frame whose overlay has never been needed stays uninitialized: no node
//! is created just to be hidden.

use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;
use std::time::{Duration, Instant};

use dispel_core::{Detection, EffectHandle, IconSlot, PreviewSource, StyleCurveCache, detect};
use dispel_types::{Category, DisplayContext, StyleConfig};

use crate::frame::{Roster, UnitFrame};
use crate::host::OverlayHost;
use crate::overlays::{NodeState, appearance, layout};

/// Delay between world entry and the bulk refresh it triggers.
pub const WORLD_ENTER_DELAY: Duration = Duration::from_millis(500);

/// Per-frame events that call for re-evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTrigger {
    /// Status effects changed: full re-evaluation
    StatusChanged,
    /// Health changed: refresh the tracking gradient only
    VitalChanged,
    /// Range eligibility changed: re-apply attenuation only
    RangeChanged,
    /// Style config changed: full re-evaluation with fresh curves
    ConfigChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HideReason {
    Disabled,
    NotPresent,
    NoCategory,
    NoResolver,
    NoPreviewData,
}

#[derive(Debug, Clone, Copy)]
enum Source {
    Hidden(HideReason),
    Opaque {
        handle: EffectHandle,
        in_range: bool,
        health: Option<(f32, f32)>,
    },
    Raw {
        category: Category,
        in_range: bool,
        health: Option<(f32, f32)>,
    },
}

struct PreviewMode {
    context: DisplayContext,
    source: Box<dyn PreviewSource>,
}

type DeferredAction = Box<dyn FnOnce(&mut OverlayEngine, &dyn OverlayHost)>;

struct Deferred {
    due: Instant,
    action: DeferredAction,
}

/// Debug view of one frame's overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySnapshot {
    /// `None` while the frame has no node yet
    pub state: Option<NodeState>,
    pub visible_borders: usize,
    pub gradient_visible: bool,
    pub darken_visible: bool,
    pub visible_edges: usize,
    pub visible_icons: Vec<IconSlot>,
    pub alpha: f32,
    pub pulsing: bool,
}

/// The overlay service: one per process, shared by every roster.
pub struct OverlayEngine {
    config: StyleConfig,
    curves: StyleCurveCache,
    layout_generation: u64,
    preview: Option<PreviewMode>,
    deferred: Vec<Deferred>,
    warned_no_resolver: bool,
}

impl fmt::Debug for OverlayEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayEngine")
            .field("config", &self.config)
            .field("curves", &self.curves)
            .field("layout_generation", &self.layout_generation)
            .field("preview", &self.preview.as_ref().map(|p| p.context))
            .field("deferred", &self.deferred.len())
            .finish()
    }
}

impl OverlayEngine {
    pub fn new(config: StyleConfig) -> Self {
        Self {
            config: config.validated(),
            curves: StyleCurveCache::new(),
            layout_generation: 0,
            preview: None,
            deferred: Vec::new(),
            warned_no_resolver: false,
        }
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// Replace the style config and invalidate every cached curve.
    ///
    /// Frames pick the change up on their next update; send
    /// [`OverlayTrigger::ConfigChanged`] or call
    /// [`OverlayEngine::update_all_overlays`] to apply it immediately.
    pub fn set_config(&mut self, config: StyleConfig) {
        self.config = config.validated();
        self.invalidate_style_cache();
    }

    /// Drop all cached curves and force a relayout on next show.
    pub fn invalidate_style_cache(&mut self) {
        self.curves.invalidate();
        self.layout_generation += 1;
    }

    pub fn curves(&self) -> &StyleCurveCache {
        &self.curves
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preview mode
    // ─────────────────────────────────────────────────────────────────────────

    /// Render canned data on frames of `context` instead of live state.
    pub fn enable_preview(&mut self, context: DisplayContext, source: Box<dyn PreviewSource>) {
        tracing::debug!(?context, "Preview mode enabled");
        self.preview = Some(PreviewMode { context, source });
    }

    pub fn disable_preview(&mut self) {
        if self.preview.take().is_some() {
            tracing::debug!("Preview mode disabled");
        }
    }

    pub fn preview_context(&self) -> Option<DisplayContext> {
        self.preview.as_ref().map(|p| p.context)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Updates
    // ─────────────────────────────────────────────────────────────────────────

    /// Full re-evaluation of one frame.
    pub fn update_overlay<H: OverlayHost + ?Sized>(&mut self, host: &H, frame: &mut UnitFrame) {
        match self.resolve_source(host, frame) {
            Source::Hidden(reason) => {
                if frame.overlay().is_some_and(|node| node.is_shown()) {
                    tracing::trace!(unit = %frame.unit, ?reason, "Hiding overlay");
                }
                if let Some(node) = frame.overlay_mut() {
                    appearance::hide(node);
                }
            }
            source => self.show(host, frame, source),
        }
    }

    /// Route a trigger to the minimal work it needs.
    pub fn handle_trigger<H: OverlayHost + ?Sized>(
        &mut self,
        host: &H,
        frame: &mut UnitFrame,
        trigger: OverlayTrigger,
    ) {
        match trigger {
            OverlayTrigger::StatusChanged | OverlayTrigger::ConfigChanged => {
                self.update_overlay(host, frame)
            }
            OverlayTrigger::VitalChanged => self.refresh_health(host, frame),
            OverlayTrigger::RangeChanged => self.refresh_range(host, frame),
        }
    }

    /// Re-evaluate every frame in the roster.
    pub fn update_all_overlays<H: OverlayHost + ?Sized>(
        &mut self,
        host: &H,
        roster: &mut dyn Roster,
    ) {
        let mut count = 0usize;
        roster.for_each_frame(&mut |frame| {
            self.update_overlay(host, frame);
            count += 1;
        });
        tracing::debug!(frames = count, "Refreshed all overlays");
    }

    /// Force-hide every overlay, e.g. when the feature is switched off.
    pub fn clear_all_overlays(&mut self, roster: &mut dyn Roster) {
        roster.for_each_frame(&mut |frame| {
            if let Some(node) = frame.overlay_mut() {
                appearance::hide(node);
            }
        });
    }

    /// Queue a bulk refresh shortly after world entry.
    ///
    /// The roster is held weakly; if it is gone by the time the refresh is
    /// due, the refresh does nothing.
    pub fn schedule_world_refresh<R: Roster + 'static>(
        &mut self,
        roster: Weak<RefCell<R>>,
        now: Instant,
    ) {
        let action: DeferredAction =
            Box::new(move |engine: &mut OverlayEngine, host: &dyn OverlayHost| {
                let Some(roster) = roster.upgrade() else {
                    tracing::debug!("Roster dropped before world refresh");
                    return;
                };
                let Ok(mut roster) = roster.try_borrow_mut() else {
                    tracing::warn!("Roster busy, skipping world refresh");
                    return;
                };
                engine.update_all_overlays(host, &mut *roster);
            });
        self.deferred.push(Deferred {
            due: now + WORLD_ENTER_DELAY,
            action,
        });
    }

    /// Run deferred actions due at `now`. Returns how many ran.
    pub fn run_due(&mut self, host: &dyn OverlayHost, now: Instant) -> usize {
        if self.deferred.is_empty() {
            return 0;
        }
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred)
            .into_iter()
            .partition(|d| d.due <= now);
        self.deferred = pending;
        let ran = due.len();
        for deferred in due {
            (deferred.action)(self, host);
        }
        ran
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    /// Advance pulse animations on every shown overlay.
    pub fn advance_animations(&mut self, roster: &mut dyn Roster, dt: Duration) {
        roster.for_each_frame(&mut |frame| {
            if let Some(node) = frame.overlay_mut()
                && node.is_shown()
                && let Some(alpha) = node.pulse.advance(dt)
            {
                node.alpha = alpha;
            }
        });
    }

    pub fn snapshot(&self, frame: &UnitFrame) -> OverlaySnapshot {
        match frame.overlay() {
            None => OverlaySnapshot {
                state: None,
                visible_borders: 0,
                gradient_visible: false,
                darken_visible: false,
                visible_edges: 0,
                visible_icons: Vec::new(),
                alpha: 1.0,
                pulsing: false,
            },
            Some(node) => OverlaySnapshot {
                state: Some(node.state()),
                visible_borders: node.visible_borders(),
                gradient_visible: node.gradient().is_shown(),
                darken_visible: node.darken().is_shown(),
                visible_edges: node.visible_edges(),
                visible_icons: node.visible_icons(),
                alpha: node.alpha(),
                pulsing: node.is_pulsing(),
            },
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn preview_for(&self, frame: &UnitFrame) -> Option<&PreviewMode> {
        self.preview.as_ref().filter(|p| p.context == frame.context)
    }

    fn resolve_source<H: OverlayHost + ?Sized>(&mut self, host: &H, frame: &UnitFrame) -> Source {
        if let Some(preview) = self.preview_for(frame) {
            let alternate = frame.context == DisplayContext::Raid;
            return match preview.source.preview(frame.slot, alternate) {
                Some(data) if data.category != Category::None => Source::Raw {
                    category: data.category,
                    in_range: data.in_range,
                    health: Some((data.health_fraction.clamp(0.0, 1.0), 1.0)),
                },
                _ => Source::Hidden(HideReason::NoPreviewData),
            };
        }

        if !self.config.enabled_for(frame.context) {
            return Source::Hidden(HideReason::Disabled);
        }

        let unit = &frame.unit;
        if !host.exists(unit) {
            return Source::Hidden(HideReason::NotPresent);
        }

        let detection = detect(host, unit, &self.config);
        tracing::trace!(%unit, ?detection, "Detected category");

        let in_range = host.in_range(unit).unwrap_or(true);
        let health = self
            .config
            .tracks_health()
            .then(|| (host.health_current(unit), host.health_max(unit)));

        match detection {
            Some(Detection::Indexed(handle)) => {
                if host.color_resolver().is_none() {
                    if !self.warned_no_resolver {
                        tracing::warn!("Host has no color resolver, indexed categories hidden");
                        self.warned_no_resolver = true;
                    }
                    return Source::Hidden(HideReason::NoResolver);
                }
                Source::Opaque {
                    handle,
                    in_range,
                    health,
                }
            }
            Some(Detection::ScanOnly { category, .. }) => Source::Raw {
                category,
                in_range,
                health,
            },
            None => Source::Hidden(HideReason::NoCategory),
        }
    }

    fn show<H: OverlayHost + ?Sized>(&mut self, host: &H, frame: &mut UnitFrame, source: Source) {
        let generation = self.layout_generation;
        let (unit, geometry, node) = frame.parts_mut();
        let relayout = !node.is_shown() || layout::needs_layout(node, geometry, generation);

        let health = match source {
            Source::Hidden(_) => return,
            Source::Opaque {
                handle,
                in_range,
                health,
            } => {
                let Some(resolver) = host.color_resolver() else {
                    appearance::hide(node);
                    return;
                };
                appearance::show_opaque(
                    node,
                    &self.config,
                    &mut self.curves,
                    resolver,
                    unit,
                    handle,
                    in_range,
                );
                health
            }
            Source::Raw {
                category,
                in_range,
                health,
            } => {
                appearance::show_raw(node, &self.config, category, in_range);
                health
            }
        };

        if relayout {
            layout::apply_layout(node, &self.config, geometry, generation);
        }

        if self.config.tracks_health()
            && let Some((current, max)) = health
        {
            appearance::set_health_value(node, current, max);
        }
    }

    fn refresh_health<H: OverlayHost + ?Sized>(&mut self, host: &H, frame: &mut UnitFrame) {
        if !self.config.tracks_health() || self.preview_for(frame).is_some() {
            return;
        }
        let current = host.health_current(&frame.unit);
        let max = host.health_max(&frame.unit);
        if let Some(node) = frame.overlay_mut()
            && node.is_shown()
        {
            appearance::set_health_value(node, current, max);
        }
    }

    fn refresh_range<H: OverlayHost + ?Sized>(&mut self, host: &H, frame: &mut UnitFrame) {
        let in_range = match self.preview_for(frame) {
            Some(preview) => preview
                .source
                .preview(frame.slot, frame.context == DisplayContext::Raid)
                .is_none_or(|data| data.in_range),
            None => host.in_range(&frame.unit).unwrap_or(true),
        };
        if let Some(node) = frame.overlay_mut() {
            appearance::apply_range(node, &self.config, in_range);
        }
    }
}

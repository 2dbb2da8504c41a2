//! Color resolution seam with the host
//!
//! Indexed categories reach the engine as effect handles whose category may
//! not be read or compared. The host resolves `handle + curve` into an
//! [`OpaqueColor`], which the engine can only hand on to widgets. Nothing
//! outside the rasterizer ever looks inside one.

use std::fmt;
use std::rc::Rc;

use dispel_core::sim::SimulatedRoster;
use dispel_core::{EffectHandle, RosterHost, StyleCurve, UnitToken};
use dispel_types::Rgba;

/// A color the engine may apply but never inspect.
///
/// Wraps the resolver's callback rather than the color itself. There is no
/// equality and no accessor outside this crate's rasterizer.
#[derive(Clone)]
pub struct OpaqueColor(Rc<dyn Fn() -> Rgba>);

impl OpaqueColor {
    pub fn new(resolve: impl Fn() -> Rgba + 'static) -> Self {
        Self(Rc::new(resolve))
    }

    pub(crate) fn reveal(&self) -> Rgba {
        (self.0)()
    }
}

impl fmt::Debug for OpaqueColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OpaqueColor(..)")
    }
}

/// The opaque-value-safe resolver.
pub trait ColorResolver {
    /// Evaluate `curve` at the category of `handle` on `unit`. `None` when
    /// the host has no color for this handle.
    fn resolve_category_color(
        &self,
        unit: &UnitToken,
        handle: EffectHandle,
        curve: &StyleCurve,
    ) -> Option<OpaqueColor>;
}

/// Host surface the overlay engine runs against.
pub trait OverlayHost: RosterHost {
    /// The color resolver, if the host provides one. Without it indexed
    /// categories cannot be displayed and the overlay stays hidden.
    fn color_resolver(&self) -> Option<&dyn ColorResolver>;
}

impl ColorResolver for SimulatedRoster {
    fn resolve_category_color(
        &self,
        unit: &UnitToken,
        handle: EffectHandle,
        curve: &StyleCurve,
    ) -> Option<OpaqueColor> {
        let category = self.category_of(unit, handle)?;
        let color = curve.evaluate(category.id());
        Some(OpaqueColor::new(move || color))
    }
}

impl OverlayHost for SimulatedRoster {
    fn color_resolver(&self) -> Option<&dyn ColorResolver> {
        Some(self)
    }
}

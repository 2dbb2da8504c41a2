//! Contracts for the host collaborators the engine reads from.
//!
//! The roster subsystem, the status index and the preview data source all
//! live outside this workspace. The engine only sees them through these
//! traits, which keeps every update path testable against [`crate::sim`].

use std::fmt;

use dispel_types::Category;

/// Identifies a roster unit ("party1", "raid17", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitToken(String);

impl UnitToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UnitToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UnitToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Host-issued handle to one active status effect instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectHandle(pub u32);

/// One entry of a harmful-effect scan. The category here is a plain value:
/// scan results are only trusted for the scan-only categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarmfulEffect {
    pub handle: EffectHandle,
    pub category: Category,
}

/// Entity queries consumed by the detector and the overlay engine.
pub trait RosterHost {
    /// Whether the unit currently exists.
    fn exists(&self, unit: &UnitToken) -> bool;

    /// Active effects removable by the local player, in host order.
    ///
    /// Maintained by the host and cheap to query; usually empty or one or
    /// two entries.
    fn removable_effects(&self, unit: &UnitToken) -> Vec<EffectHandle>;

    /// Harmful effect at `index` (0-based), or `None` past the end.
    fn harmful_effect(&self, unit: &UnitToken, index: usize) -> Option<HarmfulEffect>;

    fn health_current(&self, unit: &UnitToken) -> f32;

    fn health_max(&self, unit: &UnitToken) -> f32;

    /// Range eligibility. `None` means unknown and is treated as in range.
    fn in_range(&self, unit: &UnitToken) -> Option<bool>;
}

/// Canned data for preview (test) mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewData {
    pub category: Category,
    pub in_range: bool,
    /// Health as a 0-1 fraction
    pub health_fraction: f32,
}

/// Source of preview data, keyed by roster slot.
pub trait PreviewSource {
    /// `alternate` selects the raid-context data set.
    fn preview(&self, slot: usize, alternate: bool) -> Option<PreviewData>;
}

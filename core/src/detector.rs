//! Category detection
//!
//! Finds the single category to display for one unit. The host's
//! removable-status index is consulted first; only when it is empty does
//! the detector fall back to a bounded scan of harmful effects for the two
//! categories the index does not carry (bleed and enrage).

use dispel_types::{Category, StyleConfig};

use crate::host::{EffectHandle, HarmfulEffect, RosterHost, UnitToken};

/// Upper bound on harmful effects inspected by the fallback scan.
pub const SCAN_LIMIT: usize = 40;

/// Result of a successful detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// Found through the removable-status index. The category is not known
    /// here; it is resolved by the host from the handle and a style curve.
    Indexed(EffectHandle),
    /// Found by the fallback scan; the category is a plain value.
    ScanOnly {
        category: Category,
        handle: EffectHandle,
    },
}

impl Detection {
    pub fn handle(&self) -> EffectHandle {
        match self {
            Detection::Indexed(handle) => *handle,
            Detection::ScanOnly { handle, .. } => *handle,
        }
    }
}

/// Iterate a unit's harmful effects in host order, inspecting at most
/// `limit` entries and stopping at the end of the list.
pub fn scan_harmful_effects<'a, H: RosterHost + ?Sized>(
    host: &'a H,
    unit: &'a UnitToken,
    limit: usize,
) -> impl Iterator<Item = HarmfulEffect> + 'a {
    (0..limit).map_while(move |index| host.harmful_effect(unit, index))
}

/// Detect the category to show for `unit`.
///
/// The index always wins over the scan, regardless of which effect is
/// newer. The scan only runs when at least one scan-only category has a
/// non-black color, and it only matches categories whose color is set.
pub fn detect<H: RosterHost + ?Sized>(
    host: &H,
    unit: &UnitToken,
    config: &StyleConfig,
) -> Option<Detection> {
    if let Some(handle) = host.removable_effects(unit).first() {
        return Some(Detection::Indexed(*handle));
    }

    if !config.scan_fallback_enabled() {
        return None;
    }

    // A scan-only category colored black is switched off, so it must not
    // mask a later enabled one: skip it and keep scanning.
    scan_harmful_effects(host, unit, SCAN_LIMIT)
        .find(|effect| {
            effect.category.is_scan_only() && !config.colors.color(effect.category).is_black()
        })
        .map(|effect| Detection::ScanOnly {
            category: effect.category,
            handle: effect.handle,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimulatedRoster;

    fn unit() -> UnitToken {
        UnitToken::new("party1")
    }

    #[test]
    fn test_no_effects_detects_nothing() {
        let mut roster = SimulatedRoster::new();
        roster.add_unit(unit());
        assert_eq!(detect(&roster, &unit(), &StyleConfig::default()), None);
    }

    #[test]
    fn test_indexed_match_wins_over_scan() {
        let mut roster = SimulatedRoster::new();
        roster.add_unit(unit());
        // Bleed applied first so it sits ahead of the magic effect in scan order.
        roster.apply(&unit(), Category::Bleed);
        let magic = roster.apply(&unit(), Category::Magic).unwrap();

        let detection = detect(&roster, &unit(), &StyleConfig::default());
        assert_eq!(detection, Some(Detection::Indexed(magic)));
        assert_eq!(roster.harmful_queries(), 0);
    }

    #[test]
    fn test_scan_finds_bleed() {
        let mut roster = SimulatedRoster::new();
        roster.add_unit(unit());
        roster.apply_unlisted(&unit(), 3);
        let bleed = roster.apply(&unit(), Category::Bleed).unwrap();

        let detection = detect(&roster, &unit(), &StyleConfig::default());
        assert_eq!(
            detection,
            Some(Detection::ScanOnly {
                category: Category::Bleed,
                handle: bleed,
            })
        );
        // Three filler entries plus the bleed itself.
        assert_eq!(roster.harmful_queries(), 4);
    }

    #[test]
    fn test_scan_never_exceeds_limit() {
        let mut roster = SimulatedRoster::new();
        roster.add_unit(unit());
        roster.apply_unlisted(&unit(), SCAN_LIMIT + 10);
        roster.apply(&unit(), Category::Enrage);

        assert_eq!(detect(&roster, &unit(), &StyleConfig::default()), None);
        assert_eq!(roster.harmful_queries(), SCAN_LIMIT);
    }

    #[test]
    fn test_scan_skipped_when_colors_black() {
        let mut roster = SimulatedRoster::new();
        roster.add_unit(unit());
        roster.apply(&unit(), Category::Bleed);

        let mut config = StyleConfig::default();
        config.colors.bleed = [0.0; 3];
        config.colors.enrage = [0.0; 3];

        assert_eq!(detect(&roster, &unit(), &config), None);
        assert_eq!(roster.harmful_queries(), 0);
    }

    #[test]
    fn test_scan_ignores_category_with_black_color() {
        let mut roster = SimulatedRoster::new();
        roster.add_unit(unit());
        roster.apply(&unit(), Category::Enrage);
        let bleed = roster.apply(&unit(), Category::Bleed).unwrap();

        let mut config = StyleConfig::default();
        config.colors.enrage = [0.0; 3];

        let detection = detect(&roster, &unit(), &config);
        assert_eq!(detection.map(|d| d.handle()), Some(bleed));
    }
}

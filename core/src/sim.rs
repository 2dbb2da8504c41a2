//! Deterministic in-memory roster host.
//!
//! Backs the preview binary and the test suites of both engine crates.
//! Harmful-effect lookups are counted so callers can observe how much of a
//! unit's effect list a scan touched.

use std::cell::Cell;

use dispel_types::Category;
use hashbrown::HashMap;

use crate::host::{
    EffectHandle, HarmfulEffect, PreviewData, PreviewSource, RosterHost, UnitToken,
};

#[derive(Debug, Clone)]
struct SimUnit {
    harmful: Vec<HarmfulEffect>,
    health: (f32, f32),
    in_range: Option<bool>,
}

impl Default for SimUnit {
    fn default() -> Self {
        Self {
            harmful: Vec::new(),
            health: (100.0, 100.0),
            in_range: Some(true),
        }
    }
}

/// Simulated roster: units, their harmful effects, health and range.
#[derive(Debug, Default)]
pub struct SimulatedRoster {
    units: HashMap<UnitToken, SimUnit>,
    next_handle: u32,
    harmful_queries: Cell<usize>,
}

impl SimulatedRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unit(&mut self, unit: UnitToken) {
        self.units.entry(unit).or_default();
    }

    pub fn remove_unit(&mut self, unit: &UnitToken) {
        self.units.remove(unit);
    }

    /// Apply a harmful effect of `category`. Indexed categories also show up
    /// in the removable index. Returns `None` for unknown units.
    pub fn apply(&mut self, unit: &UnitToken, category: Category) -> Option<EffectHandle> {
        let handle = EffectHandle(self.next_handle);
        let sim = self.units.get_mut(unit)?;
        self.next_handle += 1;
        sim.harmful.push(HarmfulEffect { handle, category });
        Some(handle)
    }

    /// Apply `count` harmful effects with no removable category.
    pub fn apply_unlisted(&mut self, unit: &UnitToken, count: usize) {
        for _ in 0..count {
            self.apply(unit, Category::None);
        }
    }

    pub fn remove_effect(&mut self, unit: &UnitToken, handle: EffectHandle) {
        if let Some(sim) = self.units.get_mut(unit) {
            sim.harmful.retain(|e| e.handle != handle);
        }
    }

    pub fn clear_effects(&mut self, unit: &UnitToken) {
        if let Some(sim) = self.units.get_mut(unit) {
            sim.harmful.clear();
        }
    }

    pub fn set_health(&mut self, unit: &UnitToken, current: f32, max: f32) {
        if let Some(sim) = self.units.get_mut(unit) {
            sim.health = (current, max);
        }
    }

    pub fn set_in_range(&mut self, unit: &UnitToken, in_range: Option<bool>) {
        if let Some(sim) = self.units.get_mut(unit) {
            sim.in_range = in_range;
        }
    }

    /// Category behind a handle. This is what a host resolver knows and the
    /// engine does not.
    pub fn category_of(&self, unit: &UnitToken, handle: EffectHandle) -> Option<Category> {
        self.units
            .get(unit)?
            .harmful
            .iter()
            .find(|e| e.handle == handle)
            .map(|e| e.category)
    }

    /// Harmful-effect lookups since the last reset.
    pub fn harmful_queries(&self) -> usize {
        self.harmful_queries.get()
    }

    pub fn reset_query_count(&self) {
        self.harmful_queries.set(0);
    }
}

impl RosterHost for SimulatedRoster {
    fn exists(&self, unit: &UnitToken) -> bool {
        self.units.contains_key(unit)
    }

    fn removable_effects(&self, unit: &UnitToken) -> Vec<EffectHandle> {
        self.units
            .get(unit)
            .map(|sim| {
                sim.harmful
                    .iter()
                    .filter(|e| e.category.is_indexed())
                    .map(|e| e.handle)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn harmful_effect(&self, unit: &UnitToken, index: usize) -> Option<HarmfulEffect> {
        self.harmful_queries.set(self.harmful_queries.get() + 1);
        self.units.get(unit)?.harmful.get(index).copied()
    }

    fn health_current(&self, unit: &UnitToken) -> f32 {
        self.units.get(unit).map_or(0.0, |sim| sim.health.0)
    }

    fn health_max(&self, unit: &UnitToken) -> f32 {
        self.units.get(unit).map_or(0.0, |sim| sim.health.1)
    }

    fn in_range(&self, unit: &UnitToken) -> Option<bool> {
        self.units.get(unit).and_then(|sim| sim.in_range)
    }
}

/// Fixed preview data per slot, with a separate raid data set.
#[derive(Debug, Clone, Default)]
pub struct StaticPreview {
    party: Vec<Option<PreviewData>>,
    raid: Vec<Option<PreviewData>>,
}

impl StaticPreview {
    pub fn new(party: Vec<Option<PreviewData>>, raid: Vec<Option<PreviewData>>) -> Self {
        Self { party, raid }
    }

    /// One slot per category in [`Category::ALL`], cycling range and health
    /// so every visual state shows up in a roster preview.
    pub fn showcase(slots: usize) -> Self {
        let entries: Vec<_> = (0..slots)
            .map(|slot| {
                let category = Category::ALL[slot % Category::ALL.len()];
                (category != Category::None).then_some(PreviewData {
                    category,
                    in_range: slot % 3 != 2,
                    health_fraction: 1.0 - (slot % 4) as f32 * 0.2,
                })
            })
            .collect();
        Self {
            party: entries.clone(),
            raid: entries,
        }
    }
}

impl PreviewSource for StaticPreview {
    fn preview(&self, slot: usize, alternate: bool) -> Option<PreviewData> {
        let set = if alternate { &self.raid } else { &self.party };
        set.get(slot).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removable_index_only_lists_indexed_categories() {
        let mut roster = SimulatedRoster::new();
        let unit = UnitToken::new("raid3");
        roster.add_unit(unit.clone());
        roster.apply(&unit, Category::Bleed);
        let poison = roster.apply(&unit, Category::Poison).unwrap();
        assert_eq!(roster.removable_effects(&unit), vec![poison]);
        assert_eq!(roster.category_of(&unit, poison), Some(Category::Poison));
    }

    #[test]
    fn test_apply_to_missing_unit_is_none() {
        let mut roster = SimulatedRoster::new();
        assert_eq!(roster.apply(&UnitToken::new("party9"), Category::Magic), None);
    }

    #[test]
    fn test_static_preview_separates_contexts() {
        let data = PreviewData {
            category: Category::Curse,
            in_range: true,
            health_fraction: 0.5,
        };
        let preview = StaticPreview::new(vec![Some(data)], vec![None]);
        assert_eq!(preview.preview(0, false), Some(data));
        assert_eq!(preview.preview(0, true), None);
        assert_eq!(preview.preview(7, false), None);
    }
}

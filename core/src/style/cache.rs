//! Process-wide memo of style curves, cleared wholesale on config change.

use std::sync::Arc;

use dispel_types::{Category, Rgba, StyleConfig};
use hashbrown::HashMap;

use super::{IconSlot, StyleCurve};

/// Identifies which visual element a curve belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveSlot {
    Border,
    Gradient,
    Icon(IconSlot),
}

/// Lazily built curves, keyed by element.
///
/// `invalidate` is the only mutator besides the lazy fill; it must be called
/// after every configuration write. There is no partial invalidation: a
/// curve has at most seven points and settings changes are rare.
#[derive(Debug, Default)]
pub struct StyleCurveCache {
    curves: HashMap<CurveSlot, Arc<StyleCurve>>,
    builds: u64,
    generation: u64,
}

impl StyleCurveCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Border curve: configured color per category at `border_alpha`.
    pub fn border_curve(&mut self, config: &StyleConfig) -> Arc<StyleCurve> {
        self.get_or_build(CurveSlot::Border, config)
    }

    /// Gradient curve: configured color at the intensity-scaled gradient alpha.
    pub fn gradient_curve(&mut self, config: &StyleConfig) -> Arc<StyleCurve> {
        self.get_or_build(CurveSlot::Gradient, config)
    }

    /// Icon curve: white at `icon_alpha` for the icon's own categories,
    /// white at zero alpha for everything else.
    pub fn icon_curve(&mut self, slot: IconSlot, config: &StyleConfig) -> Arc<StyleCurve> {
        self.get_or_build(CurveSlot::Icon(slot), config)
    }

    /// Drop every cached curve.
    pub fn invalidate(&mut self) {
        if !self.curves.is_empty() {
            tracing::debug!(cached = self.curves.len(), "Invalidating style curve cache");
        }
        self.curves.clear();
        self.generation += 1;
    }

    /// Number of curve builds since creation.
    pub fn build_count(&self) -> u64 {
        self.builds
    }

    /// Incremented by every `invalidate`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cached(&self, slot: CurveSlot) -> bool {
        self.curves.contains_key(&slot)
    }

    fn get_or_build(&mut self, slot: CurveSlot, config: &StyleConfig) -> Arc<StyleCurve> {
        if let Some(curve) = self.curves.get(&slot) {
            return Arc::clone(curve);
        }
        let curve = Arc::new(build_curve(slot, config));
        self.builds += 1;
        self.curves.insert(slot, Arc::clone(&curve));
        curve
    }
}

fn build_curve(slot: CurveSlot, config: &StyleConfig) -> StyleCurve {
    match slot {
        CurveSlot::Border => colored_curve(config, config.border_alpha),
        CurveSlot::Gradient => colored_curve(config, config.effective_gradient_alpha()),
        CurveSlot::Icon(icon) => {
            let targets = icon.categories();
            StyleCurve::from_fn(|category| {
                if targets.contains(&category) {
                    Rgba::WHITE.with_alpha(config.icon_alpha)
                } else {
                    Rgba::WHITE.with_alpha(0.0)
                }
            })
        }
    }
}

fn colored_curve(config: &StyleConfig, alpha: f32) -> StyleCurve {
    StyleCurve::from_fn(|category: Category| config.colors.color(category).with_alpha(alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_are_complete_for_any_config() {
        let mut cache = StyleCurveCache::new();
        let configs = [
            StyleConfig::default(),
            StyleConfig {
                border_alpha: 0.0,
                gradient_alpha: 1.0,
                gradient_intensity: 3.0,
                icon_alpha: 0.2,
                ..Default::default()
            },
        ];
        for config in &configs {
            cache.invalidate();
            let mut curves = vec![cache.border_curve(config), cache.gradient_curve(config)];
            curves.extend(IconSlot::ALL.map(|slot| cache.icon_curve(slot, config)));
            for curve in curves {
                for category in Category::ALL {
                    assert!(curve.entry(category).is_some(), "missing {category}");
                }
                assert_eq!(curve.entry(Category::None).map(|c| c.a), Some(0.0));
            }
        }
    }

    #[test]
    fn test_memoized_until_invalidated() {
        let mut cache = StyleCurveCache::new();
        let config = StyleConfig::default();
        let a = cache.border_curve(&config);
        let b = cache.border_curve(&config);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.build_count(), 1);

        cache.invalidate();
        assert!(!cache.is_cached(CurveSlot::Border));
        let c = cache.border_curve(&config);
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.build_count(), 2);
    }

    #[test]
    fn test_invalidate_picks_up_new_color() {
        let mut cache = StyleCurveCache::new();
        let mut config = StyleConfig::default();
        let before = cache.gradient_curve(&config).entry(Category::Curse);

        config.colors.curse = [0.1, 0.9, 0.1];
        cache.invalidate();
        let after = cache.gradient_curve(&config).entry(Category::Curse);

        assert_ne!(before, after);
        let after = after.unwrap();
        assert_eq!((after.r, after.g, after.b), (0.1, 0.9, 0.1));
    }

    #[test]
    fn test_gradient_alpha_capped() {
        let mut cache = StyleCurveCache::new();
        let config = StyleConfig {
            gradient_alpha: 0.7,
            gradient_intensity: 2.0,
            ..Default::default()
        };
        let curve = cache.gradient_curve(&config);
        assert_eq!(curve.entry(Category::Magic).map(|c| c.a), Some(1.0));
    }

    #[test]
    fn test_icon_curve_alpha_only_for_own_categories() {
        let mut cache = StyleCurveCache::new();
        let config = StyleConfig {
            icon_alpha: 0.8,
            ..Default::default()
        };
        let bleed = cache.icon_curve(IconSlot::Bleed, &config);
        assert_eq!(bleed.entry(Category::Bleed).map(|c| c.a), Some(0.8));
        assert_eq!(bleed.entry(Category::Enrage).map(|c| c.a), Some(0.8));
        assert_eq!(bleed.entry(Category::Magic).map(|c| c.a), Some(0.0));

        let curse = cache.icon_curve(IconSlot::Curse, &config);
        assert_eq!(curse.entry(Category::Curse), Some(Rgba::WHITE.with_alpha(0.8)));
        assert_eq!(curse.entry(Category::Poison).map(|c| c.a), Some(0.0));
    }
}

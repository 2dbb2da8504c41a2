use dispel_types::{Category, Rgba};

/// Immutable step function from category id to color.
///
/// Points are kept sorted by id. Evaluating between two points yields the
/// lower point's color, which is how the host resolver treats curves built
/// with step interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleCurve {
    points: Vec<(u8, Rgba)>,
}

impl StyleCurve {
    /// Build a curve with one point per category in [`Category::ALL`].
    ///
    /// `color_for` is asked once per category except `None`, which is always
    /// fully transparent.
    pub fn from_fn(mut color_for: impl FnMut(Category) -> Rgba) -> Self {
        let points = Category::ALL
            .into_iter()
            .map(|category| {
                let color = match category {
                    Category::None => Rgba::TRANSPARENT,
                    other => color_for(other),
                };
                (category.id(), color)
            })
            .collect();
        Self { points }
    }

    /// Exact entry for a category.
    pub fn entry(&self, category: Category) -> Option<Rgba> {
        let id = category.id();
        self.points
            .binary_search_by_key(&id, |(k, _)| *k)
            .ok()
            .map(|i| self.points[i].1)
    }

    /// Step evaluation at an arbitrary id.
    pub fn evaluate(&self, id: u8) -> Rgba {
        let idx = self.points.partition_point(|(k, _)| *k <= id);
        match idx {
            0 => self.points.first().map(|p| p.1).unwrap_or(Rgba::TRANSPARENT),
            i => self.points[i - 1].1,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (u8, Rgba)> + '_ {
        self.points.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_curve() -> StyleCurve {
        StyleCurve::from_fn(|c| match c {
            Category::Bleed => Rgba::new(1.0, 0.0, 0.0, 0.5),
            _ => Rgba::WHITE,
        })
    }

    #[test]
    fn test_none_is_transparent_even_if_closure_disagrees() {
        let curve = StyleCurve::from_fn(|_| Rgba::WHITE);
        assert_eq!(curve.entry(Category::None), Some(Rgba::TRANSPARENT));
        assert_eq!(curve.len(), Category::ALL.len());
    }

    #[test]
    fn test_step_evaluation_between_points() {
        let curve = red_curve();
        // 5..=8 have no category; they take Poison's (4) value.
        assert_eq!(curve.evaluate(6), Rgba::WHITE);
        assert_eq!(curve.evaluate(11), Rgba::new(1.0, 0.0, 0.0, 0.5));
        assert_eq!(curve.evaluate(200), Rgba::new(1.0, 0.0, 0.0, 0.5));
        assert_eq!(curve.evaluate(0), Rgba::TRANSPARENT);
    }
}

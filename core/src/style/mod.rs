//! Style curves and their cache
//!
//! A style curve is the only channel through which category-dependent
//! styling reaches the overlay. The engine hands a curve to the host color
//! resolver together with an effect handle and gets back a color it cannot
//! inspect.
//!
//! ```text
//! StyleConfig ──build──▶ StyleCurve (Category → Rgba, step function)
//!                              │
//!             effect handle ───┤
//!                              ▼
//!                   host color resolver ──▶ opaque color ──▶ element paint
//! ```

mod cache;
mod curve;

pub use cache::{CurveSlot, StyleCurveCache};
pub use curve::StyleCurve;

use dispel_types::Category;

/// One icon per detectable category; bleed and enrage share a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IconSlot {
    Magic,
    Curse,
    Disease,
    Poison,
    Bleed,
}

impl IconSlot {
    pub const ALL: [IconSlot; 5] = [
        IconSlot::Magic,
        IconSlot::Curse,
        IconSlot::Disease,
        IconSlot::Poison,
        IconSlot::Bleed,
    ];

    /// Categories this icon represents.
    pub fn categories(self) -> &'static [Category] {
        match self {
            IconSlot::Magic => &[Category::Magic],
            IconSlot::Curse => &[Category::Curse],
            IconSlot::Disease => &[Category::Disease],
            IconSlot::Poison => &[Category::Poison],
            IconSlot::Bleed => &[Category::Bleed, Category::Enrage],
        }
    }

    /// Icon used to display a category. Enrage reuses the bleed icon.
    pub fn for_category(category: Category) -> Option<Self> {
        match category {
            Category::None => None,
            Category::Magic => Some(IconSlot::Magic),
            Category::Curse => Some(IconSlot::Curse),
            Category::Disease => Some(IconSlot::Disease),
            Category::Poison => Some(IconSlot::Poison),
            Category::Bleed | Category::Enrage => Some(IconSlot::Bleed),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

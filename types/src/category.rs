//! Removable status categories.

use serde::{Deserialize, Serialize};

/// Closed set of status categories the overlay can display.
///
/// The numeric ids match the values a host status API reports, so they are
/// also the breakpoints of every style curve. Ordering of the variants is by
/// id; detection priority is a separate concern handled by the detector.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Category {
    #[default]
    None = 0,
    Magic = 1,
    Curse = 2,
    Disease = 3,
    Poison = 4,
    Enrage = 9,
    Bleed = 11,
}

impl Category {
    /// Every category, `None` included, in id order.
    pub const ALL: [Category; 7] = [
        Category::None,
        Category::Magic,
        Category::Curse,
        Category::Disease,
        Category::Poison,
        Category::Enrage,
        Category::Bleed,
    ];

    /// Categories discoverable through the host's removable-status index.
    pub const INDEXED: [Category; 4] = [
        Category::Magic,
        Category::Curse,
        Category::Disease,
        Category::Poison,
    ];

    /// Categories that require a scan of harmful effects.
    pub const SCAN_ONLY: [Category; 2] = [Category::Bleed, Category::Enrage];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn is_indexed(self) -> bool {
        Self::INDEXED.contains(&self)
    }

    pub fn is_scan_only(self) -> bool {
        matches!(self, Category::Bleed | Category::Enrage)
    }

    /// Lowercase name used as the key in the color table.
    pub fn name(self) -> &'static str {
        match self {
            Category::None => "none",
            Category::Magic => "magic",
            Category::Curse => "curse",
            Category::Disease => "disease",
            Category::Poison => "poison",
            Category::Enrage => "enrage",
            Category::Bleed => "bleed",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

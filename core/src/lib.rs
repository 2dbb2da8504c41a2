pub mod config;
pub mod detector;
pub mod host;
pub mod sim;
pub mod style;

// Re-exports for convenience
pub use detector::{Detection, SCAN_LIMIT, detect, scan_harmful_effects};
pub use host::{EffectHandle, HarmfulEffect, PreviewData, PreviewSource, RosterHost, UnitToken};
pub use style::{CurveSlot, IconSlot, StyleCurve, StyleCurveCache};

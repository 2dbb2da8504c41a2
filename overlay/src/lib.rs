//! Status-category overlays for unit frames
//!
//! Highlights frames whose unit carries a removable harmful effect with a
//! colored border, a gradient fill and a category icon.

pub mod engine;
pub mod frame;
pub mod host;
pub mod overlays;
pub mod render;
pub mod utils;
pub mod widgets;


// Re-exports for convenience
pub use engine::{OverlayEngine, OverlaySnapshot, OverlayTrigger, WORLD_ENTER_DELAY};
pub use frame::{FrameGeometry, HealthBarLayout, Roster, UnitFrame};
pub use host::{ColorResolver, OpaqueColor, OverlayHost};
pub use overlays::{DisplayMode, NodeState, OverlayNode, PulseAnimation};
pub use render::{RenderError, rasterize, render_roster, render_roster_png};

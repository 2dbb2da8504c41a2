//! Dispel overlay building blocks
//!
//! - [`node`] - the per-frame bundle of sub-elements
//! - [`layout`] - geometry for every element
//! - [`appearance`] - paint, opacity and visibility
//! - [`pulse`] - overlay-wide alpha animation
//!
//! The [`crate::engine`] state machine drives these per update.

pub mod appearance;
pub mod layout;
mod node;
pub mod pulse;

pub use node::{DisplayMode, NodeState, OverlayNode};
pub use pulse::PulseAnimation;

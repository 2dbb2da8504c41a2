//! Shared configuration and data types for the dispel overlay.
//!
//! These types cross every crate boundary: the engine in `dispel-overlay`
//! reads them, `dispel-core` builds style curves from them, and the config
//! store serializes them to TOML.

mod category;
mod color;
mod config;

pub use category::Category;
pub use color::Rgba;
pub use config::{
    BlendMode, CategoryColors, DisplayContext, GradientStyle, IconPosition, StyleConfig,
};

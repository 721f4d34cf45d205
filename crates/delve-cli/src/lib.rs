//! delve-cli: terminal front end for the layout generator
//!
//! Glyph sets, colors and text/JSON output for generated layouts.

pub mod display;
pub mod logger;
pub mod render;
pub mod theme;

pub use display::{GlyphSet, GraphicsMode, detect_glyph_set};
pub use theme::Theme;

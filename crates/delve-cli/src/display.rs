//! Glyph sets for printing layouts
//!
//! Provides support for both classic ASCII and fancy Unicode block characters.

use delve_core::layout::TileKind;
use strum::{Display, EnumString, VariantNames};

/// Available graphics modes for map output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames, Default)]
#[strum(serialize_all = "lowercase")]
pub enum GraphicsMode {
    /// Classic ASCII characters.
    Classic,
    /// Fancy Unicode block characters.
    Fancy,
    /// Automatically detect support.
    #[default]
    Auto,
}

/// Set of glyphs used for rendering map cells.
pub trait GlyphSet: Send + Sync {
    /// Get the character for a cell; `None` is an unpainted cell.
    fn tile_char(&self, tile: Option<TileKind>) -> char;
}

/// Same characters as the plain-text grid dump.
pub struct ClassicGlyphs;

impl GlyphSet for ClassicGlyphs {
    fn tile_char(&self, tile: Option<TileKind>) -> char {
        tile.map_or(' ', |t| t.symbol())
    }
}

/// Unicode shading glyph set.
pub struct FancyGlyphs;

impl GlyphSet for FancyGlyphs {
    fn tile_char(&self, tile: Option<TileKind>) -> char {
        match tile {
            Some(TileKind::Room) => '·',
            Some(TileKind::Corridor) => '▒',
            Some(TileKind::Ground) => '░',
            None => ' ',
        }
    }
}

/// Detect if the terminal supports Unicode/UTF-8.
pub fn supports_unicode() -> bool {
    // Check LANG, LC_ALL, or LC_CTYPE for "UTF-8"
    for var in ["LANG", "LC_ALL", "LC_CTYPE"] {
        if let Ok(val) = std::env::var(var) {
            let val = val.to_uppercase();
            if val.contains("UTF-8") || val.contains("UTF8") {
                return true;
            }
        }
    }

    if let Ok(term) = std::env::var("TERM") {
        return matches!(term.as_str(), "xterm-256color" | "alacritty" | "kitty" | "iterm");
    }

    false
}

/// Returns the best available glyph set for the current environment.
pub fn detect_glyph_set(mode: GraphicsMode) -> Box<dyn GlyphSet> {
    match mode {
        GraphicsMode::Classic => Box::new(ClassicGlyphs),
        GraphicsMode::Fancy => Box::new(FancyGlyphs),
        GraphicsMode::Auto => {
            if supports_unicode() {
                Box::new(FancyGlyphs)
            } else {
                Box::new(ClassicGlyphs)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_graphics_mode_parsing() {
        assert_eq!(GraphicsMode::from_str("classic").unwrap(), GraphicsMode::Classic);
        assert_eq!(GraphicsMode::from_str("fancy").unwrap(), GraphicsMode::Fancy);
        assert_eq!(GraphicsMode::from_str("auto").unwrap(), GraphicsMode::Auto);
        assert!(GraphicsMode::from_str("ansi").is_err());
        assert_eq!(GraphicsMode::VARIANTS, &["classic", "fancy", "auto"]);
    }

    #[test]
    fn test_classic_matches_tile_symbols() {
        for kind in TileKind::iter() {
            assert_eq!(ClassicGlyphs.tile_char(Some(kind)), kind.symbol());
        }
        assert_eq!(ClassicGlyphs.tile_char(None), ' ');
    }

    #[test]
    fn test_fancy_glyphs_are_distinct() {
        let chars: Vec<char> = TileKind::iter()
            .map(|k| FancyGlyphs.tile_char(Some(k)))
            .collect();
        assert_eq!(chars, vec!['·', '▒', '░']);
    }
}

//! Terminal color theme
//!
//! Adaptive palettes for dark and light terminal backgrounds. Auto-detects
//! via the COLORFGBG env var, or a manual override with DELVE_LIGHT_BG=1.

use crossterm::style::Color;
use delve_core::layout::TileKind;

/// Colors used when printing a layout with `--color`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub map_room: Color,
    pub map_corridor: Color,
    pub map_ground: Color,
    pub map_empty: Color,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            map_room: Color::White,
            map_corridor: Color::Yellow,
            map_ground: Color::DarkGreen,
            map_empty: Color::Black,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            map_room: Color::Black,
            map_corridor: Color::DarkYellow,
            map_ground: Color::Green,
            map_empty: Color::White,
        }
    }

    /// Auto-detect terminal background and return the matching theme.
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Foreground color for a cell; `None` is an unpainted cell.
    pub fn tile_color(&self, tile: Option<TileKind>) -> Color {
        match tile {
            Some(TileKind::Room) => self.map_room,
            Some(TileKind::Corridor) => self.map_corridor,
            Some(TileKind::Ground) => self.map_ground,
            None => self.map_empty,
        }
    }

    fn is_light_background() -> bool {
        if let Ok(val) = std::env::var("DELVE_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // COLORFGBG is "fg;bg" with color indices 0-15
        if let Ok(colorfgbg) = std::env::var("COLORFGBG")
            && let Some(bg_str) = colorfgbg.rsplit(';').next()
            && let Ok(bg_idx) = bg_str.parse::<u8>()
        {
            return matches!(bg_idx, 7 | 9..=15);
        }

        false
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_rooms_are_white() {
        let theme = Theme::dark();
        assert_eq!(theme.tile_color(Some(TileKind::Room)), Color::White);
    }

    #[test]
    fn test_light_theme_rooms_are_black() {
        let theme = Theme::light();
        assert_eq!(theme.tile_color(Some(TileKind::Room)), Color::Black);
    }

    #[test]
    fn test_tiles_have_distinct_colors() {
        for theme in [Theme::dark(), Theme::light()] {
            let room = theme.tile_color(Some(TileKind::Room));
            let corridor = theme.tile_color(Some(TileKind::Corridor));
            let ground = theme.tile_color(Some(TileKind::Ground));
            assert_ne!(room, corridor);
            assert_ne!(corridor, ground);
            assert_ne!(room, ground);
        }
    }
}

//! Grid cell contents

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Tile painted into a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum TileKind {
    Room = 0,
    Corridor = 1,
    /// Default terrain filled in after the layout is connected
    Ground = 2,
}

impl TileKind {
    /// Room or corridor: part of the connected layout
    pub const fn is_walkable(&self) -> bool {
        matches!(self, TileKind::Room | TileKind::Corridor)
    }

    /// Get the display character for this tile
    pub const fn symbol(&self) -> char {
        match self {
            TileKind::Room => '.',
            TileKind::Corridor => '#',
            TileKind::Ground => '"',
        }
    }
}

/// A single grid cell. Holds at most one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub tile: Option<TileKind>,
}

impl Cell {
    /// An unpainted cell
    pub const fn empty() -> Self {
        Self { tile: None }
    }

    pub const fn is_occupied(&self) -> bool {
        self.tile.is_some()
    }

    pub const fn tile_kind(&self) -> Option<TileKind> {
        self.tile
    }

    pub fn is(&self, kind: TileKind) -> bool {
        self.tile == Some(kind)
    }

    /// Room or corridor tile present
    pub fn is_walkable(&self) -> bool {
        self.tile.is_some_and(|t| t.is_walkable())
    }

    /// Display character; unpainted cells are blank
    pub fn symbol(&self) -> char {
        self.tile.map_or(' ', |t| t.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_walkable_kinds() {
        assert!(TileKind::Room.is_walkable());
        assert!(TileKind::Corridor.is_walkable());
        assert!(!TileKind::Ground.is_walkable());
    }

    #[test]
    fn test_symbols_are_distinct() {
        let symbols: Vec<char> = TileKind::iter().map(|t| t.symbol()).collect();
        for (i, a) in symbols.iter().enumerate() {
            assert!(!symbols[i + 1..].contains(a));
        }
        assert_eq!(Cell::empty().symbol(), ' ');
    }

    #[test]
    fn test_cell_queries() {
        let cell = Cell {
            tile: Some(TileKind::Corridor),
        };
        assert!(cell.is_occupied());
        assert!(cell.is(TileKind::Corridor));
        assert!(!cell.is(TileKind::Room));
        assert!(cell.is_walkable());
        assert!(!Cell::empty().is_occupied());
    }
}

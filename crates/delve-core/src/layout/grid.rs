//! Tile grid the layout is painted into

use serde::{Deserialize, Serialize};

use super::cell::{Cell, TileKind};
use super::rect::Point;
use crate::error::LayoutError;

/// Rectangular tile storage, row-major.
///
/// Lookups outside the grid return `None`; painting outside the grid is a
/// no-op. The layout pipeline only ever paints with `overwrite = false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl TileGrid {
    /// Create an empty grid
    pub fn new(width: i32, height: i32) -> Result<Self, LayoutError> {
        if width <= 0 || height <= 0 {
            return Err(LayoutError::InvalidGrid { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::empty(); width as usize * height as usize],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.in_bounds(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    /// Bounds-checked lookup
    pub fn cell_at(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// True if the cell exists and holds `kind`
    pub fn is_tile(&self, p: Point, kind: TileKind) -> bool {
        self.cell_at(p).is_some_and(|c| c.is(kind))
    }

    /// True if the cell exists and holds a room or corridor tile
    pub fn is_walkable(&self, p: Point) -> bool {
        self.cell_at(p).is_some_and(|c| c.is_walkable())
    }

    /// Paint a tile. Without `overwrite`, occupied cells are left untouched.
    ///
    /// Returns whether the cell changed.
    pub fn paint(&mut self, p: Point, kind: TileKind, overwrite: bool) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        let cell = &mut self.cells[i];
        if cell.is_occupied() && !overwrite {
            return false;
        }
        if cell.tile == Some(kind) {
            return false;
        }
        cell.tile = Some(kind);
        true
    }

    /// Every coordinate, x outer and y inner
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let (w, h) = (self.width, self.height);
        (0..w).flat_map(move |x| (0..h).map(move |y| Point::new(x, y)))
    }

    /// Number of cells holding `kind`
    pub fn count(&self, kind: TileKind) -> usize {
        self.cells.iter().filter(|c| c.is(kind)).count()
    }

    /// Number of unpainted cells
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_occupied()).count()
    }

    /// One line per row
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Render the grid as text, one line per row
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.rows() {
            out.extend(row.iter().map(Cell::symbol));
            out.push('\n');
        }
        out
    }
}

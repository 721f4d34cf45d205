//! Grid geometry: points, sizes and axis-aligned rectangles
//!
//! Rectangles are half-open: a `Rect` at `(x, y)` with size `w x h` covers
//! columns `x..x + w` and rows `y..y + h`.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Squared Euclidean distance. Orders points exactly like the real distance.
    pub fn distance_squared(self, other: Point) -> i64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        dx * dx + dy * dy
    }

    /// The 8 surrounding cells (no bounds check)
    pub fn neighbors8(self) -> impl Iterator<Item = Point> {
        (-1..=1)
            .flat_map(|dx| (-1..=1).map(move |dy| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// The 4 orthogonal neighbours (no bounds check)
    pub fn neighbors4(self) -> [Point; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        self.offset(rhs.x, rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Error from parsing a `WxH` size string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected WIDTHxHEIGHT, got '{0}'")]
pub struct ParseSizeError(String);

impl FromStr for Size {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSizeError(s.to_string());
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(err)?;
        let width = w.trim().parse().map_err(|_| err())?;
        let height = h.trim().parse().map_err(|_| err())?;
        Ok(Size::new(width, height))
    }
}

/// An axis-aligned integer rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the rightmost column
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom row
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Number of covered cells
    pub fn area(&self) -> i64 {
        i64::from(self.width.max(0)) * i64::from(self.height.max(0))
    }

    /// Check if the rectangle has positive area
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Integer midpoint, rounded down
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub const fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Check if this rectangle contains another
    pub const fn contains(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// Check if this rectangle shares at least one cell with another
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Shrink by `margin` on every side
    pub const fn inset(&self, margin: i32) -> Rect {
        Rect::new(
            self.x + margin,
            self.y + margin,
            self.width - 2 * margin,
            self.height - 2 * margin,
        )
    }

    /// All covered cells, column by column
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (x0, x1, y0, y1) = (self.x, self.right(), self.y, self.bottom());
        (x0..x1).flat_map(move |x| (y0..y1).map(move |y| Point::new(x, y)))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@({}, {})", self.width, self.height, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let r = Rect::new(10, 20, 6, 4);
        assert_eq!(r.right(), 16);
        assert_eq!(r.bottom(), 24);
        assert_eq!(r.area(), 24);
        assert_eq!(r.points().count(), 24);
    }

    #[test]
    fn test_center_rounds_down() {
        assert_eq!(Rect::new(0, 0, 5, 5).center(), Point::new(2, 2));
        assert_eq!(Rect::new(3, 4, 6, 7).center(), Point::new(6, 7));
    }

    #[test]
    fn test_rect_contains() {
        let outer = Rect::new(0, 0, 20, 20);
        let inner = Rect::new(5, 5, 10, 10);
        let outside = Rect::new(25, 25, 5, 5);

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&outside));
        assert!(outer.contains(&outer));
    }

    #[test]
    fn test_rect_intersects() {
        let r1 = Rect::new(0, 0, 10, 10);
        let r2 = Rect::new(5, 5, 10, 10);
        let touching = Rect::new(10, 0, 5, 5);

        assert!(r1.intersects(&r2));
        assert!(r2.intersects(&r1));
        assert!(!r1.intersects(&touching));
    }

    #[test]
    fn test_inset() {
        let r = Rect::new(0, 0, 10, 8).inset(1);
        assert_eq!(r, Rect::new(1, 1, 8, 6));
    }

    #[test]
    fn test_neighbors() {
        let p = Point::new(3, 3);
        let n8: Vec<_> = p.neighbors8().collect();
        assert_eq!(n8.len(), 8);
        assert!(!n8.contains(&p));
        assert!(n8.contains(&Point::new(2, 2)));
        assert_eq!(p.neighbors4().len(), 4);
    }

    #[test]
    fn test_distance_squared() {
        assert_eq!(Point::new(0, 0).distance_squared(Point::new(3, 4)), 25);
    }

    #[test]
    fn test_parse_size() {
        assert_eq!("20x12".parse::<Size>(), Ok(Size::new(20, 12)));
        assert_eq!("6X6".parse::<Size>(), Ok(Size::new(6, 6)));
        assert!("20".parse::<Size>().is_err());
        assert!("ax3".parse::<Size>().is_err());
    }
}

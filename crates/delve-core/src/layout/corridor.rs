//! Corridor routing between sibling subtrees
//!
//! Walks the partition tree bottom-up. For every internal node the closest
//! pair of room centers across its two subtrees is joined:
//! 1. Direct L-shaped corridor, rejected if it would run alongside an
//!    existing corridor
//! 2. Retries with symmetric endpoint jitter
//! 3. Forced corridor to the nearest existing corridor tile
//!
//! Pairs that stay unconnected are left to the repair stages.

use serde::{Deserialize, Serialize};

use super::cell::TileKind;
use super::grid::TileGrid;
use super::partition::{NodeId, PartitionTree};
use super::rect::Point;
use crate::config::LayoutConfig;

/// Which strategy drew a corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorridorKind {
    /// Sibling pair, first attempt
    Direct,
    /// Sibling pair, jittered retry
    Jittered,
    /// Sibling pair, forced to the nearest corridor
    Forced,
    /// Isolated room joined to a nearby corridor
    Repair,
    /// Two clusters joined by the global merge
    Merge,
}

/// A drawn corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorRecord {
    pub kind: CorridorKind,
    pub from: Point,
    pub to: Point,
    /// Cells that were empty and got a corridor tile
    pub painted: usize,
}

/// Result of joining one sibling pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionOutcome {
    Direct,
    /// Succeeded with `from + offset` and `to - offset`
    Jittered { offset: Point },
    /// Joined `from` to the corridor tile at `target`
    Forced { target: Point },
    Unconnected,
}

/// Counts of sibling connection outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStats {
    pub direct: usize,
    pub jittered: usize,
    pub forced: usize,
    pub unconnected: usize,
    /// Internal nodes with a roomless subtree
    pub skipped: usize,
}

impl ConnectionStats {
    fn record(&mut self, outcome: ConnectionOutcome) {
        match outcome {
            ConnectionOutcome::Direct => self.direct += 1,
            ConnectionOutcome::Jittered { .. } => self.jittered += 1,
            ConnectionOutcome::Forced { .. } => self.forced += 1,
            ConnectionOutcome::Unconnected => self.unconnected += 1,
        }
    }

    /// Internal nodes that got a corridor
    pub fn connected(&self) -> usize {
        self.direct + self.jittered + self.forced
    }
}

/// Cells of the two-segment corridor from `from` toward `to`.
///
/// Runs horizontally along `from.y`, then vertically along `to.x`. The end
/// point is excluded, so the last cell is orthogonally adjacent to `to`.
pub fn corridor_path(from: Point, to: Point) -> Vec<Point> {
    let x_dir = if from.x < to.x { 1 } else { -1 };
    let y_dir = if from.y < to.y { 1 } else { -1 };
    let len = (to.x - from.x).unsigned_abs() + (to.y - from.y).unsigned_abs();
    let mut path = Vec::with_capacity(len as usize);

    let mut x = from.x;
    while x != to.x {
        path.push(Point::new(x, from.y));
        x += x_dir;
    }
    let mut y = from.y;
    while y != to.y {
        path.push(Point::new(to.x, y));
        y += y_dir;
    }
    path
}

/// Check if any of the 8 surrounding cells holds a corridor tile
pub fn touches_corridor(grid: &TileGrid, p: Point) -> bool {
    p.neighbors8().any(|n| grid.is_tile(n, TileKind::Corridor))
}

/// Check if a corridor along `path` would run alongside an existing one
pub fn would_touch_corridor(grid: &TileGrid, path: &[Point]) -> bool {
    path.iter().any(|&p| touches_corridor(grid, p))
}

/// Paint a corridor unconditionally. Occupied cells keep their tile.
///
/// Returns the number of cells painted.
pub fn draw_corridor(grid: &mut TileGrid, from: Point, to: Point) -> usize {
    let painted = corridor_path(from, to)
        .into_iter()
        .filter(|&p| grid.paint(p, TileKind::Corridor, false))
        .count();
    log::trace!("corridor {from} -> {to}: {painted} cells");
    painted
}

/// Paint a corridor only if it would not touch an existing corridor.
///
/// Returns `None` if the path is empty or rejected; nothing is painted then.
pub fn draw_corridor_safe(grid: &mut TileGrid, from: Point, to: Point) -> Option<usize> {
    let path = corridor_path(from, to);
    if path.is_empty() || would_touch_corridor(grid, &path) {
        return None;
    }
    let painted = path
        .into_iter()
        .filter(|&p| grid.paint(p, TileKind::Corridor, false))
        .count();
    log::trace!("corridor {from} -> {to}: {painted} cells");
    Some(painted)
}

/// Nearest corridor tile in square rings of radius `1..=radius` around `from`.
///
/// Within a ring, cells are scanned with dx outer and dy inner, ascending.
pub fn nearest_corridor_in_rings(grid: &TileGrid, from: Point, radius: i32) -> Option<Point> {
    // Rings wider than the grid hold no cells
    let radius = radius.min(grid.width().max(grid.height()));
    for r in 1..=radius {
        for dx in -r..=r {
            for dy in -r..=r {
                if dx.abs() != r && dy.abs() != r {
                    continue; // Interior was covered by a smaller ring
                }
                let p = from.offset(dx, dy);
                if grid.is_tile(p, TileKind::Corridor) {
                    return Some(p);
                }
            }
        }
    }
    None
}

/// Closest pair `(a, b)` with `a` from `left` and `b` from `right`.
///
/// Ties keep the first pair found. `None` if either side is empty.
pub fn closest_pair(left: &[Point], right: &[Point]) -> Option<(Point, Point)> {
    let mut best: Option<(i64, Point, Point)> = None;
    for &a in left {
        for &b in right {
            let dist = a.distance_squared(b);
            if best.is_none_or(|(d, _, _)| dist < d) {
                best = Some((dist, a, b));
            }
        }
    }
    best.map(|(_, a, b)| (a, b))
}

/// Join `a` to `b` with the escalating strategy described at module level.
pub fn connect_points(
    grid: &mut TileGrid,
    a: Point,
    b: Point,
    config: &LayoutConfig,
    corridors: &mut Vec<CorridorRecord>,
) -> ConnectionOutcome {
    if let Some(painted) = draw_corridor_safe(grid, a, b) {
        corridors.push(CorridorRecord {
            kind: CorridorKind::Direct,
            from: a,
            to: b,
            painted,
        });
        return ConnectionOutcome::Direct;
    }

    let jitter = config.jitter_range;
    for i in -jitter..=jitter {
        for j in -jitter..=jitter {
            let from = a.offset(i, j);
            let to = b.offset(-i, -j);
            if let Some(painted) = draw_corridor_safe(grid, from, to) {
                corridors.push(CorridorRecord {
                    kind: CorridorKind::Jittered,
                    from,
                    to,
                    painted,
                });
                return ConnectionOutcome::Jittered {
                    offset: Point::new(i, j),
                };
            }
        }
    }

    if let Some(target) = nearest_corridor_in_rings(grid, a, config.fallback_radius) {
        let painted = draw_corridor(grid, a, target);
        corridors.push(CorridorRecord {
            kind: CorridorKind::Forced,
            from: a,
            to: target,
            painted,
        });
        return ConnectionOutcome::Forced { target };
    }

    ConnectionOutcome::Unconnected
}

/// Bottom-up connection pass over a partition tree
pub struct SiblingConnector<'a> {
    grid: &'a mut TileGrid,
    config: &'a LayoutConfig,
    corridors: &'a mut Vec<CorridorRecord>,
    stats: ConnectionStats,
}

impl<'a> SiblingConnector<'a> {
    pub fn new(
        grid: &'a mut TileGrid,
        config: &'a LayoutConfig,
        corridors: &'a mut Vec<CorridorRecord>,
    ) -> Self {
        Self {
            grid,
            config,
            corridors,
            stats: ConnectionStats::default(),
        }
    }

    /// Connect every internal node of `tree`, children before parents
    pub fn run(mut self, tree: &PartitionTree) -> ConnectionStats {
        self.connect_subtree(tree, PartitionTree::ROOT);
        log::debug!("sibling connections: {:?}", self.stats);
        self.stats
    }

    fn connect_subtree(&mut self, tree: &PartitionTree, id: NodeId) {
        let Some((left, right)) = tree.node(id).children else {
            return;
        };
        self.connect_subtree(tree, left);
        self.connect_subtree(tree, right);

        let left_centers = tree.room_centers(left);
        let right_centers = tree.room_centers(right);
        let Some((a, b)) = closest_pair(&left_centers, &right_centers) else {
            self.stats.skipped += 1;
            return;
        };

        let outcome = connect_points(self.grid, a, b, self.config, self.corridors);
        log::debug!("node {} {a} -> {b}: {outcome:?}", id.0);
        self.stats.record(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::rect::Rect;
    use crate::layout::room::carve_room;

    fn grid_with_rooms(width: i32, height: i32, rooms: &[Rect]) -> TileGrid {
        let mut grid = TileGrid::new(width, height).unwrap();
        for &room in rooms {
            carve_room(&mut grid, room);
        }
        grid
    }

    #[test]
    fn test_path_shape() {
        let path = corridor_path(Point::new(0, 0), Point::new(3, 2));
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(3, 0),
                Point::new(3, 1),
            ]
        );
    }

    #[test]
    fn test_path_reverse_direction() {
        let path = corridor_path(Point::new(5, 5), Point::new(3, 2));
        assert_eq!(
            path,
            vec![
                Point::new(5, 5),
                Point::new(4, 5),
                Point::new(3, 5),
                Point::new(3, 4),
                Point::new(3, 3),
            ]
        );
    }

    #[test]
    fn test_path_ends_next_to_target() {
        for (from, to) in [
            (Point::new(2, 9), Point::new(14, 1)),
            (Point::new(7, 3), Point::new(7, 12)),
            (Point::new(7, 3), Point::new(1, 3)),
        ] {
            let path = corridor_path(from, to);
            let last = *path.last().unwrap();
            assert!(to.neighbors4().contains(&last));
            assert_eq!(path[0], from);
            for pair in path.windows(2) {
                assert!(pair[0].neighbors4().contains(&pair[1]));
            }
        }
        assert!(corridor_path(Point::new(4, 4), Point::new(4, 4)).is_empty());
    }

    #[test]
    fn test_draw_never_overwrites_rooms() {
        let room = Rect::new(4, 0, 3, 3);
        let mut grid = grid_with_rooms(10, 5, &[room]);
        let painted = draw_corridor(&mut grid, Point::new(0, 1), Point::new(9, 1));
        assert_eq!(painted, 6);
        assert_eq!(grid.count(TileKind::Room), 9);
        assert!(grid.is_tile(Point::new(5, 1), TileKind::Room));
    }

    #[test]
    fn test_safe_draw_rejects_adjacent_corridor() {
        let mut grid = TileGrid::new(10, 10).unwrap();
        grid.paint(Point::new(5, 4), TileKind::Corridor, false);

        // Diagonal neighbour of (4, 5) and (6, 5)
        assert!(draw_corridor_safe(&mut grid, Point::new(0, 5), Point::new(9, 5)).is_none());
        assert_eq!(grid.count(TileKind::Corridor), 1);

        assert_eq!(
            draw_corridor_safe(&mut grid, Point::new(0, 7), Point::new(9, 7)),
            Some(9)
        );
    }

    #[test]
    fn test_safe_draw_rejects_empty_path() {
        let mut grid = TileGrid::new(5, 5).unwrap();
        assert!(draw_corridor_safe(&mut grid, Point::new(2, 2), Point::new(2, 2)).is_none());
    }

    #[test]
    fn test_ring_search() {
        let mut grid = TileGrid::new(20, 20).unwrap();
        grid.paint(Point::new(5, 5), TileKind::Corridor, false);
        grid.paint(Point::new(9, 9), TileKind::Corridor, false);

        assert_eq!(
            nearest_corridor_in_rings(&grid, Point::new(0, 0), 10),
            Some(Point::new(5, 5))
        );
        assert_eq!(nearest_corridor_in_rings(&grid, Point::new(0, 0), 4), None);
        assert_eq!(
            nearest_corridor_in_rings(&grid, Point::new(10, 10), 3),
            Some(Point::new(9, 9))
        );
    }

    #[test]
    fn test_ring_search_radius_is_clipped_to_grid() {
        let mut grid = TileGrid::new(20, 10).unwrap();
        assert_eq!(nearest_corridor_in_rings(&grid, Point::new(5, 5), i32::MAX), None);

        grid.paint(Point::new(19, 0), TileKind::Corridor, false);
        assert_eq!(
            nearest_corridor_in_rings(&grid, Point::new(0, 9), i32::MAX),
            Some(Point::new(19, 0))
        );
    }

    #[test]
    fn test_closest_pair() {
        let left = [Point::new(0, 0), Point::new(10, 0)];
        let right = [Point::new(30, 0), Point::new(12, 3)];
        assert_eq!(
            closest_pair(&left, &right),
            Some((Point::new(10, 0), Point::new(12, 3)))
        );
        assert_eq!(closest_pair(&left, &[]), None);
    }

    #[test]
    fn test_direct_connection() {
        let a = Rect::new(2, 8, 5, 5);
        let b = Rect::new(22, 8, 5, 5);
        let mut grid = grid_with_rooms(30, 20, &[a, b]);
        let mut corridors = Vec::new();

        let outcome = connect_points(
            &mut grid,
            a.center(),
            b.center(),
            &LayoutConfig::default(),
            &mut corridors,
        );
        assert_eq!(outcome, ConnectionOutcome::Direct);
        assert_eq!(corridors.len(), 1);
        assert_eq!(corridors[0].painted, 15);
    }

    #[test]
    fn test_blocked_corridor_is_jittered() {
        let a = Rect::new(2, 8, 5, 5);
        let b = Rect::new(22, 8, 5, 5);
        let mut grid = grid_with_rooms(30, 20, &[a, b]);
        for x in 12..=16 {
            grid.paint(Point::new(x, 11), TileKind::Corridor, false);
        }
        let mut corridors = Vec::new();

        let outcome = connect_points(
            &mut grid,
            a.center(),
            b.center(),
            &LayoutConfig::default(),
            &mut corridors,
        );
        assert_eq!(
            outcome,
            ConnectionOutcome::Jittered {
                offset: Point::new(-2, -2)
            }
        );
        assert_eq!(corridors[0].from, Point::new(2, 8));
        assert_eq!(corridors[0].to, Point::new(26, 12));
    }

    #[test]
    fn test_walled_off_pair_is_forced() {
        let a = Rect::new(2, 8, 5, 5);
        let b = Rect::new(22, 8, 5, 5);
        let mut grid = grid_with_rooms(30, 20, &[a, b]);
        for y in 0..20 {
            grid.paint(Point::new(14, y), TileKind::Corridor, false);
        }
        let mut corridors = Vec::new();

        let outcome = connect_points(
            &mut grid,
            a.center(),
            b.center(),
            &LayoutConfig::default(),
            &mut corridors,
        );
        assert_eq!(
            outcome,
            ConnectionOutcome::Forced {
                target: Point::new(14, 0)
            }
        );
        assert_eq!(corridors[0].kind, CorridorKind::Forced);
    }

    #[test]
    fn test_walled_off_pair_out_of_range_is_unconnected() {
        let a = Rect::new(2, 8, 5, 5);
        let b = Rect::new(22, 8, 5, 5);
        let mut grid = grid_with_rooms(30, 20, &[a, b]);
        for y in 0..20 {
            grid.paint(Point::new(14, y), TileKind::Corridor, false);
        }
        let config = LayoutConfig {
            fallback_radius: 3,
            ..LayoutConfig::default()
        };
        let before = grid.clone();
        let mut corridors = Vec::new();

        let outcome = connect_points(&mut grid, a.center(), b.center(), &config, &mut corridors);
        assert_eq!(outcome, ConnectionOutcome::Unconnected);
        assert!(corridors.is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_sibling_connector_joins_two_leaves() {
        use crate::layout::partition::PartitionTree;
        use crate::layout::rect::Size;
        use crate::layout::room::place_rooms;
        use crate::rng::LayoutRng;

        let mut rng = LayoutRng::new(21);
        let mut grid = TileGrid::new(40, 20).unwrap();
        let config = LayoutConfig::default();
        let mut tree = PartitionTree::build(Rect::new(0, 0, 40, 20), 1, Size::new(20, 10), &mut rng);
        place_rooms(&mut tree, &mut grid, &config, &mut rng);

        let mut corridors = Vec::new();
        let stats = SiblingConnector::new(&mut grid, &config, &mut corridors).run(&tree);

        assert_eq!(stats.connected() + stats.unconnected + stats.skipped, 1);
        if tree.leaf_count() == 2 && stats.skipped == 0 {
            assert_eq!(stats.direct, 1);
            assert!(grid.count(TileKind::Corridor) > 0);
        }
    }
}

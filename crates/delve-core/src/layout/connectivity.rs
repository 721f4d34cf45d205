//! Connectivity repair
//!
//! Two passes run after the tree-driven corridors:
//! - local repair joins every room whose center has no corridor nearby to the
//!   closest corridor tile within a bounded square
//! - the global merge flood-fills room and corridor tiles into clusters and
//!   joins each extra cluster to the first one, which leaves exactly one
//!   connected region

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::cell::TileKind;
use super::corridor::{CorridorKind, CorridorRecord, closest_pair, draw_corridor, touches_corridor};
use super::grid::TileGrid;
use super::rect::Point;
use super::room::Room;

/// Outcome of the local repair pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairSummary {
    /// Centers already next to a corridor
    pub already_connected: usize,
    /// Rooms that got a repair corridor
    pub repaired: usize,
    /// Rooms with no corridor inside the search square
    pub unreachable: usize,
}

/// Outcome of the global merge pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSummary {
    /// Clusters found before merging
    pub clusters: usize,
    pub corridors_drawn: usize,
}

/// Nearest corridor tile in the square `from ± radius`, clipped to the grid.
///
/// Both bounds are inclusive, so the square is symmetric around `from`.
/// Distance is Euclidean; ties keep the first cell in x-outer, y-inner order.
pub fn nearest_corridor_in_square(grid: &TileGrid, from: Point, radius: i32) -> Option<Point> {
    let x_lo = from.x.saturating_sub(radius).max(0);
    let x_hi = from.x.saturating_add(radius).min(grid.width() - 1);
    let y_lo = from.y.saturating_sub(radius).max(0);
    let y_hi = from.y.saturating_add(radius).min(grid.height() - 1);

    let mut best: Option<(i64, Point)> = None;
    for x in x_lo..=x_hi {
        for y in y_lo..=y_hi {
            let p = Point::new(x, y);
            if !grid.is_tile(p, TileKind::Corridor) {
                continue;
            }
            let dist = from.distance_squared(p);
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, p));
            }
        }
    }
    best.map(|(_, p)| p)
}

/// Join every room whose center is not next to a corridor to the nearest one.
///
/// Repair corridors skip the collision check.
pub fn repair_rooms(
    grid: &mut TileGrid,
    rooms: &[Room],
    radius: i32,
    corridors: &mut Vec<CorridorRecord>,
) -> RepairSummary {
    let mut summary = RepairSummary::default();

    for room in rooms {
        let center = room.rect.center();
        if touches_corridor(grid, center) {
            summary.already_connected += 1;
            continue;
        }

        match nearest_corridor_in_square(grid, center, radius) {
            Some(target) => {
                let painted = draw_corridor(grid, center, target);
                corridors.push(CorridorRecord {
                    kind: CorridorKind::Repair,
                    from: center,
                    to: target,
                    painted,
                });
                summary.repaired += 1;
            }
            None => summary.unreachable += 1,
        }
    }

    if summary.unreachable > 0 {
        log::warn!(
            "{} rooms have no corridor within {radius} cells, leaving them to the global merge",
            summary.unreachable
        );
    }
    log::debug!("local repair: {summary:?}");
    summary
}

/// Partition room and corridor tiles into 4-connected clusters.
///
/// Clusters appear in discovery order (x outer, y inner); each cell is
/// visited once.
pub fn find_clusters(grid: &TileGrid) -> Vec<Vec<Point>> {
    let width = grid.width() as usize;
    let mut visited = vec![false; width * grid.height() as usize];
    let index = |p: Point| p.y as usize * width + p.x as usize;
    let mut clusters = Vec::new();
    let mut queue = VecDeque::new();

    for start in grid.points() {
        if visited[index(start)] || !grid.is_walkable(start) {
            continue;
        }

        let mut cluster = Vec::new();
        visited[index(start)] = true;
        queue.push_back(start);

        while let Some(p) = queue.pop_front() {
            cluster.push(p);
            for n in p.neighbors4() {
                if grid.is_walkable(n) && !visited[index(n)] {
                    visited[index(n)] = true;
                    queue.push_back(n);
                }
            }
        }
        clusters.push(cluster);
    }
    clusters
}

/// Number of 4-connected room/corridor clusters
pub fn count_clusters(grid: &TileGrid) -> usize {
    find_clusters(grid).len()
}

/// Join every cluster to the first one through its closest cell pair.
///
/// Merge corridors skip the collision check. Afterwards all room and
/// corridor tiles form a single cluster.
pub fn merge_clusters(grid: &mut TileGrid, corridors: &mut Vec<CorridorRecord>) -> MergeSummary {
    let mut clusters = find_clusters(grid).into_iter();
    let mut summary = MergeSummary {
        clusters: clusters.len(),
        corridors_drawn: 0,
    };

    let Some(mut main) = clusters.next() else {
        return summary;
    };

    for other in clusters {
        let Some((a, b)) = closest_pair(&main, &other) else {
            continue;
        };
        let painted = draw_corridor(grid, a, b);
        corridors.push(CorridorRecord {
            kind: CorridorKind::Merge,
            from: a,
            to: b,
            painted,
        });
        summary.corridors_drawn += 1;
        main.extend(other);
    }

    log::debug!("global merge: {summary:?}");
    summary
}

//! Rooms and room placement
//!
//! Each leaf of the partition gets at most one rectangular room, kept at
//! least `room_margin` cells away from every edge of the leaf.

use serde::{Deserialize, Serialize};

use super::cell::TileKind;
use super::grid::TileGrid;
use super::partition::PartitionTree;
use super::rect::{Point, Rect, Size};
use crate::config::LayoutConfig;
use crate::rng::RandomSource;

/// A placed room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub rect: Rect,
    /// Integer midpoint, rounded down
    pub center: Point,
}

impl Room {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            center: rect.center(),
        }
    }
}

/// Outcome of the room placement stage
#[derive(Debug, Clone, Default)]
pub struct RoomPlacement {
    /// Rooms in creation order
    pub rooms: Vec<Room>,
    /// Leaves too small for `min_room_size`
    pub too_small: usize,
    /// Leaves skipped after the placement attempt cap ran out
    pub over_cap: usize,
}

/// Pick a room inside `leaf`, or `None` if the leaf cannot host the minimum size.
pub fn room_in_leaf(
    leaf: Rect,
    min: Size,
    max: Option<Size>,
    margin: i32,
    rng: &mut impl RandomSource,
) -> Option<Rect> {
    let inset = margin.saturating_mul(2);
    let inner_width = leaf.width.saturating_sub(inset);
    let inner_height = leaf.height.saturating_sub(inset);

    if inner_width < min.width || inner_height < min.height {
        return None; // Region too small for a room
    }
    let (max_width, max_height) = match max {
        Some(cap) => (inner_width.min(cap.width), inner_height.min(cap.height)),
        None => (inner_width, inner_height),
    };

    let width = rng.range_int(min.width, max_width.saturating_add(1));
    let height = rng.range_int(min.height, max_height.saturating_add(1));

    // Slack is measured against the whole inset leaf, not the capped size
    let slack_x = inner_width - width;
    let slack_y = inner_height - height;
    let x = leaf.x + margin + rng.range_int(0, slack_x.saturating_add(1));
    let y = leaf.y + margin + rng.range_int(0, slack_y.saturating_add(1));

    Some(Rect::new(x, y, width, height))
}

/// Paint every cell of `rect` as a room tile (never overwrites)
pub fn carve_room(grid: &mut TileGrid, rect: Rect) -> usize {
    rect.points()
        .filter(|&p| grid.paint(p, TileKind::Room, false))
        .count()
}

/// Carve one room per leaf, depth-first, recording it on the leaf.
pub fn place_rooms(
    tree: &mut PartitionTree,
    grid: &mut TileGrid,
    config: &LayoutConfig,
    rng: &mut impl RandomSource,
) -> RoomPlacement {
    let mut placement = RoomPlacement::default();
    let mut attempts = 0u32;

    for id in tree.leaves() {
        if attempts >= config.max_placement_attempts {
            placement.over_cap += 1;
            continue;
        }
        attempts += 1;

        let leaf = tree.node(id).area;
        let Some(rect) = room_in_leaf(
            leaf,
            config.min_room_size,
            config.max_room_size,
            config.room_margin,
            rng,
        ) else {
            log::trace!("leaf {leaf} too small for a {} room", config.min_room_size);
            placement.too_small += 1;
            continue;
        };

        carve_room(grid, rect);
        let room = Room::new(rect);
        tree.node_mut(id).room = Some(room);
        placement.rooms.push(room);
    }

    if placement.over_cap > 0 {
        log::warn!(
            "placement attempt cap of {} reached, {} leaves left without a room",
            config.max_placement_attempts,
            placement.over_cap
        );
    }
    log::debug!(
        "placed {} rooms ({} leaves too small)",
        placement.rooms.len(),
        placement.too_small
    );
    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::LayoutRng;

    #[test]
    fn test_room_keeps_margin() {
        let leaf = Rect::new(10, 5, 20, 14);
        for seed in 0..200 {
            let mut rng = LayoutRng::new(seed);
            let room = room_in_leaf(leaf, Size::new(6, 6), None, 1, &mut rng).unwrap();
            assert!(leaf.inset(1).contains(&room), "{room} escapes {leaf}");
            assert!(room.width >= 6 && room.height >= 6);
        }
    }

    #[test]
    fn test_tight_leaf_gets_min_room() {
        let leaf = Rect::new(0, 0, 8, 8);
        let mut rng = LayoutRng::new(5);
        let room = room_in_leaf(leaf, Size::new(6, 6), None, 1, &mut rng).unwrap();
        assert_eq!(room, Rect::new(1, 1, 6, 6));
    }

    #[test]
    fn test_small_leaf_gets_no_room() {
        let mut rng = LayoutRng::new(5);
        assert!(room_in_leaf(Rect::new(0, 0, 4, 4), Size::new(6, 6), None, 1, &mut rng).is_none());
        assert!(room_in_leaf(Rect::new(0, 0, 7, 30), Size::new(6, 6), None, 1, &mut rng).is_none());
    }

    #[test]
    fn test_huge_margin_gets_no_room() {
        let mut rng = LayoutRng::new(5);
        let leaf = Rect::new(0, 0, 80, 40);
        assert!(room_in_leaf(leaf, Size::new(6, 6), None, 2_000_000_000, &mut rng).is_none());
        assert!(room_in_leaf(leaf, Size::new(6, 6), None, i32::MAX, &mut rng).is_none());
    }

    #[test]
    fn test_max_room_size_caps_dimensions() {
        let leaf = Rect::new(0, 0, 40, 40);
        for seed in 0..100 {
            let mut rng = LayoutRng::new(seed);
            let room =
                room_in_leaf(leaf, Size::new(4, 4), Some(Size::new(8, 5)), 2, &mut rng).unwrap();
            assert!(room.width <= 8 && room.height <= 5);
            assert!(leaf.inset(2).contains(&room));
        }
    }

    #[test]
    fn test_place_rooms_records_rooms_on_leaves() {
        let mut rng = LayoutRng::new(9);
        let mut grid = TileGrid::new(60, 40).unwrap();
        let config = LayoutConfig::default();
        let mut tree = PartitionTree::build(Rect::new(0, 0, 60, 40), 3, Size::new(12, 12), &mut rng);

        let placement = place_rooms(&mut tree, &mut grid, &config, &mut rng);

        let on_leaves: Vec<Room> = tree
            .leaves()
            .into_iter()
            .filter_map(|id| tree.node(id).room)
            .collect();
        assert_eq!(on_leaves, placement.rooms);
        assert_eq!(placement.rooms.len() + placement.too_small, tree.leaf_count());

        let room_cells: i64 = placement.rooms.iter().map(|r| r.rect.area()).sum();
        assert_eq!(grid.count(TileKind::Room) as i64, room_cells);
    }

    #[test]
    fn test_placement_cap() {
        let mut rng = LayoutRng::new(9);
        let mut grid = TileGrid::new(80, 80).unwrap();
        let config = LayoutConfig {
            max_placement_attempts: 1,
            ..LayoutConfig::default()
        };
        let mut tree = PartitionTree::build(Rect::new(0, 0, 80, 80), 2, Size::new(20, 20), &mut rng);
        assert!(tree.leaf_count() > 1);

        let placement = place_rooms(&mut tree, &mut grid, &config, &mut rng);
        assert_eq!(placement.rooms.len(), 1);
        assert_eq!(placement.over_cap, tree.leaf_count() - 1);
    }
}

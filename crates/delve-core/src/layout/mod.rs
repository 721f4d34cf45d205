//! BSP dungeon layout
//!
//! Contains the tile grid, the partition tree, room placement, corridor
//! routing, connectivity repair and the pipeline that ties them together.

mod cell;
mod connectivity;
mod corridor;
mod generation;
mod grid;
mod partition;
mod rect;
mod room;

pub use cell::{Cell, TileKind};
pub use connectivity::{
    MergeSummary, RepairSummary, count_clusters, find_clusters, merge_clusters,
    nearest_corridor_in_square, repair_rooms,
};
pub use corridor::{
    ConnectionOutcome, ConnectionStats, CorridorKind, CorridorRecord, SiblingConnector,
    closest_pair, connect_points, corridor_path, draw_corridor, draw_corridor_safe,
    nearest_corridor_in_rings, touches_corridor, would_touch_corridor,
};
pub use generation::{
    CancelToken, LayoutGenerator, LayoutReport, NoPause, Stage, StagePacer, fill_ground,
};
pub use grid::TileGrid;
pub use partition::{NodeId, PartitionNode, PartitionTree, SplitAxis};
pub use rect::{ParseSizeError, Point, Rect, Size};
pub use room::{Room, RoomPlacement, carve_room, place_rooms, room_in_leaf};

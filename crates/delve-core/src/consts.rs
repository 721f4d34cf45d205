//! Default layout tunables

/// Maximum partition depth (2^4 = 16 leaves at most)
pub const DEFAULT_MAX_DEPTH: u32 = 4;

/// Upper bound accepted for the partition depth
pub const MAX_PARTITION_DEPTH: u32 = 16;

/// Upper bound accepted for leaf/room sizes and the room margin
pub const MAX_TUNABLE_SIZE: i32 = 1 << 20;

/// Upper bound accepted for the corridor search radii
pub const MAX_SEARCH_RADIUS: i32 = 4096;

/// Upper bound accepted for the jitter range
pub const MAX_JITTER_RANGE: i32 = 64;

/// Minimum leaf region size
pub const DEFAULT_MIN_LEAF_WIDTH: i32 = 20;
pub const DEFAULT_MIN_LEAF_HEIGHT: i32 = 20;

/// Minimum room size
pub const DEFAULT_MIN_ROOM_WIDTH: i32 = 6;
pub const DEFAULT_MIN_ROOM_HEIGHT: i32 = 6;

/// Cells kept free between a room and the edge of its leaf
pub const DEFAULT_ROOM_MARGIN: i32 = 1;

/// Symmetric endpoint offset range for rejected corridors
pub const DEFAULT_JITTER_RANGE: i32 = 2;

/// Rings searched when forcing a connection to an existing corridor
pub const DEFAULT_FALLBACK_RADIUS: i32 = 10;

/// Half-width of the square searched when repairing an isolated room
pub const DEFAULT_REPAIR_RADIUS: i32 = 20;

/// Leaves visited by the room placer in a single run
pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: u32 = 1024;

/// Grid size used by the command-line front end
pub const DEFAULT_GRID_WIDTH: i32 = 80;
pub const DEFAULT_GRID_HEIGHT: i32 = 40;

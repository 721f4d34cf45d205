//! Layout configuration
//!
//! All tunables of the partition/room/corridor pipeline. Missing fields in a
//! JSON document fall back to the defaults in [`crate::consts`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::LayoutError;
use crate::layout::Size;

/// Tunable parameters for one layout run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum partition depth; the tree has at most 2^depth leaves
    pub max_depth: u32,
    /// A region is only split when both halves can be at least this large
    pub min_leaf_size: Size,
    /// Smallest room carved into a leaf
    pub min_room_size: Size,
    /// Optional cap on room dimensions; `None` lets rooms fill their leaf
    pub max_room_size: Option<Size>,
    /// Cells kept free between a room and its leaf edges
    pub room_margin: i32,
    /// Endpoint offsets tried in `-jitter_range..=jitter_range` on both axes
    pub jitter_range: i32,
    /// Rings searched when forcing a connection to an existing corridor
    pub fallback_radius: i32,
    /// Half-width of the square searched when repairing an isolated room
    pub repair_radius: i32,
    /// Leaves visited by the room placer in a single run
    pub max_placement_attempts: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            min_leaf_size: Size::new(DEFAULT_MIN_LEAF_WIDTH, DEFAULT_MIN_LEAF_HEIGHT),
            min_room_size: Size::new(DEFAULT_MIN_ROOM_WIDTH, DEFAULT_MIN_ROOM_HEIGHT),
            max_room_size: None,
            room_margin: DEFAULT_ROOM_MARGIN,
            jitter_range: DEFAULT_JITTER_RANGE,
            fallback_radius: DEFAULT_FALLBACK_RADIUS,
            repair_radius: DEFAULT_REPAIR_RADIUS,
            max_placement_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl LayoutConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: &Path) -> Result<Self, LayoutError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that the parameters describe a usable layout
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.max_depth > MAX_PARTITION_DEPTH {
            return Err(LayoutError::config(
                "max_depth",
                format!("must be at most {MAX_PARTITION_DEPTH}, got {}", self.max_depth),
            ));
        }
        for (field, size) in [
            ("min_leaf_size", self.min_leaf_size),
            ("min_room_size", self.min_room_size),
        ] {
            if !size.is_positive() {
                return Err(LayoutError::config(
                    field,
                    format!("must be positive, got {size}"),
                ));
            }
            if size.width > MAX_TUNABLE_SIZE || size.height > MAX_TUNABLE_SIZE {
                return Err(LayoutError::config(
                    field,
                    format!("must be at most {MAX_TUNABLE_SIZE} per side, got {size}"),
                ));
            }
        }
        if let Some(max) = self.max_room_size
            && (max.width < self.min_room_size.width || max.height < self.min_room_size.height)
        {
            return Err(LayoutError::config(
                "max_room_size",
                format!("{max} is smaller than min_room_size {}", self.min_room_size),
            ));
        }
        if !(1..=MAX_TUNABLE_SIZE).contains(&self.room_margin) {
            return Err(LayoutError::config(
                "room_margin",
                format!(
                    "must be in 1..={MAX_TUNABLE_SIZE}, got {}",
                    self.room_margin
                ),
            ));
        }
        for (field, value, max) in [
            ("jitter_range", self.jitter_range, MAX_JITTER_RANGE),
            ("fallback_radius", self.fallback_radius, MAX_SEARCH_RADIUS),
            ("repair_radius", self.repair_radius, MAX_SEARCH_RADIUS),
        ] {
            if !(0..=max).contains(&value) {
                return Err(LayoutError::config(
                    field,
                    format!("must be in 0..={max}, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

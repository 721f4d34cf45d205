//! delve-core: binary-space-partition dungeon layouts
//!
//! Splits a grid into a partition tree, carves one room per leaf, joins
//! sibling subtrees with corridors and repairs the result until every room
//! and corridor tile belongs to a single connected region.
//!
//! This crate does no terminal I/O. Randomness is injected through
//! [`RandomSource`], so any run is reproducible from its seed.

pub mod config;
pub mod error;
pub mod layout;

mod consts;
mod rng;

pub use config::LayoutConfig;
pub use consts::*;
pub use error::LayoutError;
pub use rng::{LayoutRng, RandomSource};

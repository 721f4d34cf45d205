//! Layout generation pipeline
//!
//! Runs the stages in strict order against one grid:
//! partition → rooms → sibling corridors → local repair → global merge →
//! ground fill. Each stage depends on the grid left by the previous one.
//!
//! The asynchronous entry point awaits a [`StagePacer`] between stages so a
//! presentation layer can animate the run, and checks a [`CancelToken`]
//! before every stage.

use std::future::{self, Future};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use super::cell::TileKind;
use super::connectivity::{MergeSummary, RepairSummary, merge_clusters, repair_rooms};
use super::corridor::{ConnectionStats, CorridorRecord, SiblingConnector};
use super::grid::TileGrid;
use super::partition::PartitionTree;
use super::rect::Rect;
use super::room::{Room, place_rooms};
use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::rng::RandomSource;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Stage {
    Partition,
    PlaceRooms,
    ConnectSiblings,
    RepairRooms,
    MergeClusters,
    FillGround,
}

/// Shared cancellation flag, checked between stages
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Suspension point awaited after every completed stage
pub trait StagePacer {
    fn pause(&mut self, completed: Stage) -> impl Future<Output = ()>;
}

/// Pacer that resumes immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

impl StagePacer for NoPause {
    fn pause(&mut self, _completed: Stage) -> impl Future<Output = ()> {
        future::ready(())
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutReport {
    /// Rooms in creation order
    pub rooms: Vec<Room>,
    pub leaf_count: usize,
    /// Leaves too small for the minimum room size
    pub roomless_leaves: usize,
    pub connections: ConnectionStats,
    pub repair: RepairSummary,
    pub merge: MergeSummary,
    /// Every corridor drawn, in drawing order
    pub corridors: Vec<CorridorRecord>,
    /// Cells filled with ground
    pub ground_cells: usize,
}

/// Paint every unoccupied cell with ground
pub fn fill_ground(grid: &mut TileGrid) -> usize {
    grid.points()
        .filter(|&p| grid.paint(p, TileKind::Ground, false))
        .count()
}

/// State carried from one stage to the next
struct LayoutRun<'a> {
    config: &'a LayoutConfig,
    tree: Option<PartitionTree>,
    report: LayoutReport,
}

impl<'a> LayoutRun<'a> {
    fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            tree: None,
            report: LayoutReport::default(),
        }
    }

    fn execute(&mut self, stage: Stage, grid: &mut TileGrid, rng: &mut impl RandomSource) {
        log::debug!("stage {stage}");
        let config = self.config;
        match stage {
            Stage::Partition => {
                let area = Rect::new(0, 0, grid.width(), grid.height());
                let tree =
                    PartitionTree::build(area, config.max_depth, config.min_leaf_size, rng);
                self.report.leaf_count = tree.leaf_count();
                self.tree = Some(tree);
            }
            Stage::PlaceRooms => {
                if let Some(tree) = self.tree.as_mut() {
                    let placement = place_rooms(tree, grid, config, rng);
                    self.report.roomless_leaves = placement.too_small + placement.over_cap;
                    self.report.rooms = placement.rooms;
                }
            }
            Stage::ConnectSiblings => {
                if let Some(tree) = self.tree.as_ref() {
                    self.report.connections =
                        SiblingConnector::new(grid, config, &mut self.report.corridors).run(tree);
                }
            }
            Stage::RepairRooms => {
                self.report.repair = repair_rooms(
                    grid,
                    &self.report.rooms,
                    config.repair_radius,
                    &mut self.report.corridors,
                );
            }
            Stage::MergeClusters => {
                self.report.merge = merge_clusters(grid, &mut self.report.corridors);
            }
            Stage::FillGround => {
                // The tree is only needed up to the corridor passes
                self.tree = None;
                self.report.ground_cells = fill_ground(grid);
            }
        }
    }

    fn finish(self) -> LayoutReport {
        let report = self.report;
        log::info!(
            "layout done: {} rooms in {} leaves, {} corridors, {} clusters merged",
            report.rooms.len(),
            report.leaf_count,
            report.corridors.len(),
            report.merge.clusters.saturating_sub(1)
        );
        report
    }
}

/// BSP dungeon layout generator
#[derive(Debug, Clone)]
pub struct LayoutGenerator {
    config: LayoutConfig,
}

impl LayoutGenerator {
    /// Create a generator, rejecting invalid configurations
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Run every stage synchronously
    pub fn generate(
        &self,
        grid: &mut TileGrid,
        rng: &mut impl RandomSource,
    ) -> Result<LayoutReport, LayoutError> {
        self.generate_with_cancel(grid, rng, &CancelToken::new())
    }

    /// Run every stage synchronously, stopping if `cancel` is set between stages
    pub fn generate_with_cancel(
        &self,
        grid: &mut TileGrid,
        rng: &mut impl RandomSource,
        cancel: &CancelToken,
    ) -> Result<LayoutReport, LayoutError> {
        let mut run = LayoutRun::new(&self.config);
        for stage in Stage::iter() {
            if cancel.is_cancelled() {
                log::info!("layout cancelled before {stage}");
                return Err(LayoutError::Cancelled { stage });
            }
            run.execute(stage, grid, rng);
        }
        Ok(run.finish())
    }

    /// Run every stage, awaiting `pacer` after each one.
    ///
    /// A cancellation observed between stages returns
    /// [`LayoutError::Cancelled`] naming the stage that did not run. Corridors
    /// already drawn stay on the grid.
    pub async fn generate_async<P: StagePacer>(
        &self,
        grid: &mut TileGrid,
        rng: &mut impl RandomSource,
        cancel: &CancelToken,
        pacer: &mut P,
    ) -> Result<LayoutReport, LayoutError> {
        let mut run = LayoutRun::new(&self.config);
        for stage in Stage::iter() {
            if cancel.is_cancelled() {
                log::info!("layout cancelled before {stage}");
                return Err(LayoutError::Cancelled { stage });
            }
            run.execute(stage, grid, rng);
            pacer.pause(stage).await;
        }
        Ok(run.finish())
    }
}

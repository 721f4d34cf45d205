//! Printing layouts and run summaries

use std::fmt::Write as _;
use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use delve_core::LayoutConfig;
use delve_core::layout::{CorridorKind, LayoutReport, TileGrid, TileKind, count_clusters};
use serde::Serialize;

use crate::display::GlyphSet;
use crate::theme::Theme;

/// Render the grid as plain text, one line per row
pub fn render_map(grid: &TileGrid, glyphs: &dyn GlyphSet) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        out.extend(row.iter().map(|c| glyphs.tile_char(c.tile_kind())));
        out.push('\n');
    }
    out
}

/// Write the grid with one foreground color per tile kind.
///
/// Color changes are only emitted between runs of differently colored cells.
pub fn write_colored(
    out: &mut impl Write,
    grid: &TileGrid,
    glyphs: &dyn GlyphSet,
    theme: &Theme,
) -> io::Result<()> {
    for row in grid.rows() {
        let mut current: Option<Color> = None;
        for cell in row {
            let color = theme.tile_color(cell.tile_kind());
            if current != Some(color) {
                queue!(out, SetForegroundColor(color))?;
                current = Some(color);
            }
            queue!(out, Print(glyphs.tile_char(cell.tile_kind())))?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    out.flush()
}

/// Human-readable summary of a run
pub fn format_stats(seed: u64, grid: &TileGrid, report: &LayoutReport) -> String {
    let mut out = String::new();
    let corridors_of =
        |kind: CorridorKind| report.corridors.iter().filter(|c| c.kind == kind).count();

    // Writing to a String cannot fail
    let _ = writeln!(out, "seed:        {seed}");
    let _ = writeln!(out, "grid:        {}x{}", grid.width(), grid.height());
    let _ = writeln!(
        out,
        "leaves:      {} ({} without a room)",
        report.leaf_count, report.roomless_leaves
    );
    let _ = writeln!(out, "rooms:       {}", report.rooms.len());
    let _ = writeln!(
        out,
        "siblings:    {} direct, {} jittered, {} forced, {} unconnected, {} skipped",
        report.connections.direct,
        report.connections.jittered,
        report.connections.forced,
        report.connections.unconnected,
        report.connections.skipped
    );
    let _ = writeln!(
        out,
        "repair:      {} corridors ({} unreachable)",
        corridors_of(CorridorKind::Repair),
        report.repair.unreachable
    );
    let _ = writeln!(
        out,
        "merge:       {} clusters, {} corridors",
        report.merge.clusters,
        corridors_of(CorridorKind::Merge)
    );
    let _ = writeln!(
        out,
        "tiles:       {} room, {} corridor, {} ground",
        grid.count(TileKind::Room),
        grid.count(TileKind::Corridor),
        grid.count(TileKind::Ground)
    );
    let _ = writeln!(out, "clusters:    {}", count_clusters(grid));
    out
}

/// Machine-readable output for `--json`
#[derive(Debug, Serialize)]
pub struct JsonLayout<'a> {
    pub seed: u64,
    pub width: i32,
    pub height: i32,
    pub config: &'a LayoutConfig,
    /// Classic glyphs, one string per row
    pub map: Vec<String>,
    pub report: &'a LayoutReport,
}

impl<'a> JsonLayout<'a> {
    pub fn new(
        seed: u64,
        grid: &TileGrid,
        config: &'a LayoutConfig,
        report: &'a LayoutReport,
    ) -> Self {
        Self {
            seed,
            width: grid.width(),
            height: grid.height(),
            config,
            map: grid.to_ascii().lines().map(str::to_owned).collect(),
            report,
        }
    }
}

//! BSP dungeon layout generator
//!
//! Main entry point: generate one layout and print it.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use delve_cli::display::{GraphicsMode, detect_glyph_set};
use delve_cli::render::{JsonLayout, format_stats, render_map, write_colored};
use delve_cli::{Theme, logger};
use delve_core::layout::{LayoutGenerator, Size, TileGrid};
use delve_core::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, LayoutConfig, LayoutError, LayoutRng};

/// BSP dungeon layout generator
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Delve - carve a connected dungeon layout", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: i32,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: i32,

    /// Random seed (random if omitted)
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Override the maximum partition depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Override the minimum leaf size (e.g. 20x20)
    #[arg(long, value_name = "WxH")]
    min_leaf: Option<Size>,

    /// Override the minimum room size (e.g. 6x6)
    #[arg(long, value_name = "WxH")]
    min_room: Option<Size>,

    /// Glyph set (classic, fancy, auto)
    #[arg(short = 'g', long, default_value = "auto")]
    glyphs: GraphicsMode,

    /// Colorize the map
    #[arg(long)]
    color: bool,

    /// Print the layout and report as JSON
    #[arg(long)]
    json: bool,

    /// Print a summary of the run after the map
    #[arg(long)]
    stats: bool,

    /// Verbose logging to stderr (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(logger::level_for_verbosity(args.verbose));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("delve: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), LayoutError> {
    let config = load_config(args)?;
    let generator = LayoutGenerator::new(config)?;

    let mut rng = match args.seed {
        Some(seed) => LayoutRng::new(seed),
        None => LayoutRng::from_entropy(),
    };
    let seed = rng.seed();
    log::info!("generating {}x{} layout, seed {seed}", args.width, args.height);

    let mut grid = TileGrid::new(args.width, args.height)?;
    let report = generator.generate(&mut grid, &mut rng)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        let json = JsonLayout::new(seed, &grid, generator.config(), &report);
        serde_json::to_writer_pretty(&mut out, &json)?;
        writeln!(out)?;
        return Ok(());
    }

    let glyphs = detect_glyph_set(args.glyphs);
    if args.color {
        write_colored(&mut out, &grid, glyphs.as_ref(), &Theme::detect())?;
    } else {
        out.write_all(render_map(&grid, glyphs.as_ref()).as_bytes())?;
    }

    if args.stats {
        writeln!(out)?;
        out.write_all(format_stats(seed, &grid, &report).as_bytes())?;
    }
    Ok(())
}

/// Config file (or defaults) with command-line overrides applied
fn load_config(args: &Args) -> Result<LayoutConfig, LayoutError> {
    let mut config = match &args.config {
        Some(path) => {
            log::debug!("loading config from {}", path.display());
            LayoutConfig::from_json_file(path)?
        }
        None => LayoutConfig::default(),
    };

    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    if let Some(size) = args.min_leaf {
        config.min_leaf_size = size;
    }
    if let Some(size) = args.min_room {
        config.min_room_size = size;
    }
    Ok(config)
}

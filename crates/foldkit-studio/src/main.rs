//! foldkit-studio: renders scripted fold transitions to PNG frames.
//!
//! ```text
//! foldkit-studio --out frames --scenario all --fps 30
//! foldkit-studio --scenario unfold --glance glance.png --log foldkit_ui=debug
//! ```

mod cards;
mod frames;
mod scenario;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{ensure, Context, Result};
use clap::{Parser, ValueEnum};
use foldkit_engine::logging::{init_logging, LoggingConfig};
use foldkit_engine::paint::Bitmap;
use foldkit_ui::shading::{FoldShading, GlanceShading, SolidShading};

use frames::FrameWriter;
use scenario::Options;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Paged card list: drag, fling, scroll to the end and back
    List,
    /// Thumbnail grid unfolding into a details card
    Unfold,
    /// List, then unfold
    All,
}

#[derive(Parser, Debug)]
#[command(name = "foldkit-studio")]
#[command(about = "Render scripted fold list and unfold transitions to PNG frames")]
struct Cli {
    /// Directory the frames are written to
    #[arg(long, short, default_value = "frames")]
    out: PathBuf,

    /// Number of cards in the list scenario
    #[arg(long, default_value_t = 6)]
    count: usize,

    #[arg(long, default_value_t = 360)]
    width: u32,

    #[arg(long, default_value_t = 640)]
    height: u32,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    #[arg(long, value_enum, default_value = "all")]
    scenario: Scenario,

    /// PNG swept over folding halves instead of solid shadows
    #[arg(long)]
    glance: Option<PathBuf>,

    /// Log filter in env_logger syntax; falls back to RUST_LOG
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // frames are paced by a fixed clock, wall time adds nothing
    let mut logging = LoggingConfig::default().timestamps(None);
    if let Some(filter) = &cli.log {
        logging = logging.filter(filter.as_str());
    }
    init_logging(logging);

    ensure!(cli.count > 0, "--count must be at least 1");
    ensure!(cli.fps > 0, "--fps must be at least 1");
    ensure!(cli.width >= 2 && cli.height >= 2, "frame must be at least 2x2");

    let opts = Options {
        count: cli.count,
        fps: cli.fps,
        shading: Some(load_shading(cli.glance.as_deref())?),
    };
    let mut out = FrameWriter::new(&cli.out, cli.width, cli.height)?;

    log::info!(
        "rendering {:?} at {}x{}, {} fps into {}",
        cli.scenario,
        cli.width,
        cli.height,
        cli.fps,
        cli.out.display()
    );

    if matches!(cli.scenario, Scenario::List | Scenario::All) {
        let frames = scenario::run_list(&mut out, &opts).context("list scenario")?;
        log::info!("list scenario: {frames} frames");
    }
    if matches!(cli.scenario, Scenario::Unfold | Scenario::All) {
        let frames = scenario::run_unfold(&mut out, &opts).context("unfold scenario")?;
        log::info!("unfold scenario: {frames} frames");
    }

    println!("{} frames written to {}", out.written(), cli.out.display());
    Ok(())
}

fn load_shading(glance: Option<&Path>) -> Result<Rc<dyn FoldShading>> {
    let Some(path) = glance else {
        return Ok(Rc::new(SolidShading::new()));
    };
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let bitmap = Bitmap::decode(&bytes).with_context(|| format!("decoding {}", path.display()))?;
    log::debug!("glance {}x{} from {}", bitmap.width(), bitmap.height(), path.display());
    Ok(Rc::new(GlanceShading::new(bitmap)))
}

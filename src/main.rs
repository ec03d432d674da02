mod chroma;
mod fill;
mod sheet;

use anyhow::{Context, Result};
use chroma::{NearBlack, NearWhite};
use clap::{Parser, Subcommand, ValueEnum};
use fill::flood_fill_background;
use image::RgbaImage;
use sheet::{assemble_sheet, load_animation_rows, SheetLayout};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Key out every background-colored pixel, ignoring connectivity
    Key {
        /// Source image
        input: PathBuf,

        /// Destination PNG
        output: PathBuf,

        /// Background color to key out
        #[arg(long, value_enum, default_value_t = Policy::NearBlack)]
        policy: Policy,

        /// Per-channel tolerance; defaults to 240 (near-white) or 5 (near-black)
        #[arg(long)]
        tolerance: Option<u8>,
    },

    /// Erase only the background region connected to the image border,
    /// preserving enclosed highlights inside the subject
    Refine {
        /// Source image
        input: PathBuf,

        /// Destination PNG
        output: PathBuf,

        /// Background color to flood away
        #[arg(long, value_enum, default_value_t = Policy::NearWhite)]
        policy: Policy,

        /// Per-channel tolerance; defaults to 200 (near-white) or 5 (near-black)
        #[arg(long)]
        tolerance: Option<u8>,
    },

    /// Assemble per-direction animation frames into a sprite sheet
    Sheet {
        /// Directory holding <animation>/<direction>/*.png frame trees
        frames_dir: PathBuf,

        /// Destination PNG
        output: PathBuf,

        /// Animation names, one group of rows each
        #[arg(
            long,
            value_delimiter = ',',
            default_value = "breathing-idle,running-8-frames"
        )]
        animations: Vec<String>,

        /// Direction names, one row per animation
        #[arg(
            long,
            value_delimiter = ',',
            default_value = "south,south-east,east,north-east,north,north-west,west,south-west"
        )]
        directions: Vec<String>,

        /// Square frame edge in pixels
        #[arg(long, default_value_t = 64)]
        frame_size: u32,

        /// Columns per row; longer animations are truncated
        #[arg(long, default_value_t = 8)]
        max_frames: u32,
    },
}

/// Which solid background the source art was rendered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Policy {
    NearWhite,
    NearBlack,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match args.command {
        Command::Key {
            input,
            output,
            policy,
            tolerance,
        } => run_key(&input, &output, policy, tolerance),
        Command::Refine {
            input,
            output,
            policy,
            tolerance,
        } => run_refine(&input, &output, policy, tolerance),
        Command::Sheet {
            frames_dir,
            output,
            animations,
            directions,
            frame_size,
            max_frames,
        } => run_sheet(
            &frames_dir,
            &output,
            &animations,
            &directions,
            frame_size,
            max_frames,
        ),
    }
}

fn run_key(input: &Path, output: &Path, policy: Policy, tolerance: Option<u8>) -> Result<()> {
    let mut image = load_rgba(input)?;

    // Black-background renders get their color channels zeroed along with
    // alpha; white-background ones keep their channels.
    let keyed = match policy {
        Policy::NearWhite => {
            let classifier = NearWhite::new(tolerance.unwrap_or(240));
            chroma::key_out(&mut image, &classifier, false)?
        }
        Policy::NearBlack => {
            let classifier = NearBlack::new(tolerance.unwrap_or(5));
            chroma::key_out(&mut image, &classifier, true)?
        }
    };

    tracing::info!("Keyed out {} background pixels", keyed);
    save_png(&image, output)
}

fn run_refine(input: &Path, output: &Path, policy: Policy, tolerance: Option<u8>) -> Result<()> {
    let mut image = load_rgba(input)?;

    let cleared = match policy {
        Policy::NearWhite => {
            let classifier = NearWhite::new(tolerance.unwrap_or(200));
            flood_fill_background(&mut image, &classifier)?
        }
        Policy::NearBlack => {
            let classifier = NearBlack::new(tolerance.unwrap_or(5));
            flood_fill_background(&mut image, &classifier)?
        }
    };

    tracing::info!("Cleared {} border-connected background pixels", cleared);
    save_png(&image, output)
}

fn run_sheet(
    frames_dir: &Path,
    output: &Path,
    animations: &[String],
    directions: &[String],
    frame_size: u32,
    max_frames: u32,
) -> Result<()> {
    let layout = SheetLayout {
        frame_size,
        max_frames,
    };

    let rows = load_animation_rows(frames_dir, animations, directions)
        .context("Failed to load animation frames")?;

    let (width, height) = layout.sheet_dimensions(rows.len() as u32);
    tracing::info!("Creating sprite sheet: {}x{}", width, height);

    let sheet = assemble_sheet(&layout, &rows)?;
    save_png(&sheet, output)
}

fn load_rgba(path: &Path) -> Result<RgbaImage> {
    tracing::info!("Processing {}...", path.display());
    let image = image::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .to_rgba8();
    Ok(image)
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    tracing::info!("Saved {}", path.display());
    Ok(())
}

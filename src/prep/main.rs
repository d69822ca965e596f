//! Boundary and tile grid preparation for an area of interest.
//!
//! Resolves the AOI boundary (directly from a file, or by ADM1 name from an
//! administrative dataset), then writes a UTM tile grid with an intersection
//! mask per tile.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use aoitiles::config::Config;
use aoitiles::grid::TileSize;
use aoitiles::pipeline::{self, capitalize, AoiSource, PrepRequest};

#[derive(Parser, Debug)]
#[command(name = "prep_tiles")]
#[command(about = "Prepare boundary and tiles for an area of interest (AOI)")]
#[command(group(ArgGroup::new("aoi_source").required(true).args(["aoishp", "admshp"])))]
struct Args {
    /// Name of the area of interest (AOI)
    aoi_name: String,

    /// Tile size in meters
    #[arg(value_name = "TILE_SIZE", allow_negative_numbers = true)]
    t_size: i64,

    /// GeoJSON of the AOI boundary
    #[arg(long)]
    aoishp: Option<PathBuf>,

    /// GeoJSON of subnational (ADM1) administrative boundaries
    #[arg(long)]
    admshp: Option<PathBuf>,

    /// Output directory (overrides the config file)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Fail on a bad tile size before touching any file
    let tile_size = TileSize::new(args.t_size)?;

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    // Initialize logging; stdout is kept for the run summary
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.as_deref().unwrap_or("info")))
        .context("Invalid log filter")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let source = match (args.aoishp, args.admshp) {
        (Some(path), _) => AoiSource::Boundary(path),
        (None, Some(path)) => AoiSource::Admin(path),
        (None, None) => anyhow::bail!("one of --aoishp or --admshp is required"),
    };

    let request = PrepRequest {
        aoi_name: args.aoi_name,
        tile_size,
        source,
        out_dir: args.out_dir.unwrap_or(config.output.dir),
        pretty: config.output.pretty,
    };

    info!("AOI: {}", request.aoi_name);
    let summary = pipeline::run(&request)
        .with_context(|| format!("Failed to prepare tiles for '{}'", request.aoi_name))?;

    let display_name = capitalize(&summary.aoi_name);

    if let Some(boundary) = &summary.boundary {
        println!("Boundary for {}: {}", display_name, boundary.path.display());
    }

    println!("Tiles for {}: {}", display_name, summary.tiles.path.display());
    println!(
        "{} out of {} tiles intersecting {}",
        summary.tiles.grid.masked_count(),
        summary.tiles.grid.len(),
        display_name
    );

    Ok(())
}

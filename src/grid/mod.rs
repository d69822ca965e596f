//! Tile grid generation over a projected AOI boundary.

mod layout;

use std::path::{Path, PathBuf};

use geo::{BoundingRect, Intersects, MultiPolygon};
use rayon::prelude::*;
use tracing::{debug, info};

pub use layout::{GridLayout, TileSize};

use crate::error::{PrepError, Result};
use crate::models::{Tile, TileGrid};
use crate::projection::{Reprojector, UtmZone};
use crate::vector::{read_dataset, write_tiles};

/// Result of a tile generation run.
#[derive(Debug, Clone)]
pub struct GeneratedTiles {
    pub path: PathBuf,
    pub zone: UtmZone,
    pub grid: TileGrid,
}

pub fn tiles_file_name(aoi_name: &str) -> String {
    format!("{}_tiles.geojson", aoi_name)
}

/// Build the grid over an already projected boundary and mask every tile.
///
/// Tiles touching the boundary count as intersecting.
pub fn build_tile_grid(boundary: &MultiPolygon<f64>, size: TileSize, epsg: u32) -> TileGrid {
    let layout = match boundary.bounding_rect() {
        Some(bounds) => GridLayout::covering(&bounds, size),
        None => GridLayout::covering(&geo::Rect::new((0.0, 0.0), (0.0, 0.0)), size),
    };

    debug!(
        "Grid {} x {} ({} tiles) of {} m in EPSG:{}",
        layout.nx,
        layout.ny,
        layout.len(),
        size.get(),
        epsg
    );

    let tiles: Vec<Tile> = (0..layout.len())
        .into_par_iter()
        .map(|i| {
            let (h, v, polygon) = layout.cell(i);
            let mask = boundary.intersects(&polygon);
            Tile {
                h,
                v,
                mask,
                polygon,
            }
        })
        .collect();

    TileGrid {
        epsg,
        extent: layout.extent(),
        nx: layout.nx,
        ny: layout.ny,
        tiles,
    }
}

/// Read a lon/lat boundary file, project its first geometry into the local
/// UTM zone, and write `{aoi_name}_tiles.geojson` into `out_dir`.
pub fn generate_tiles(
    boundary_path: &Path,
    size: TileSize,
    aoi_name: &str,
    out_dir: &Path,
    pretty: bool,
) -> Result<GeneratedTiles> {
    let dataset = read_dataset(boundary_path)?;

    let first = dataset
        .first()
        .ok_or_else(|| PrepError::geometry_read(boundary_path, "contains no features"))?;
    if dataset.len() > 1 {
        debug!(
            "{} has {} features, using the first",
            boundary_path.display(),
            dataset.len()
        );
    }

    let boundary = first.polygonal().ok_or_else(|| {
        PrepError::geometry_read(boundary_path, "first feature is not a Polygon or MultiPolygon")
    })?;
    let bounds = boundary
        .bounding_rect()
        .ok_or_else(|| PrepError::geometry_read(boundary_path, "first geometry is empty"))?;

    let zone = UtmZone::for_bounds(&bounds);
    info!("UTM zone {} (EPSG:{})", zone.zone, zone.epsg());

    let reprojector = Reprojector::wgs84_to(zone)?;
    let projected = reprojector.project(&boundary)?;

    let grid = build_tile_grid(&projected, size, reprojector.target_epsg());

    let path = out_dir.join(tiles_file_name(aoi_name));
    write_tiles(&path, &grid, pretty)?;
    info!(
        "Wrote {} tiles ({} intersecting) to {}",
        grid.len(),
        grid.masked_count(),
        path.display()
    );

    Ok(GeneratedTiles { path, zone, grid })
}

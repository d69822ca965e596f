//! The linear boundary -> tiles run behind the `prep_tiles` binary.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::error::{PrepError, Result};
use crate::grid::{generate_tiles, GeneratedTiles, TileSize};
use crate::resolver::{extract_boundary, ExtractedBoundary};

/// Where the AOI boundary comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AoiSource {
    /// A file holding the AOI geometry itself
    Boundary(PathBuf),
    /// An ADM1 dataset to resolve the AOI name against
    Admin(PathBuf),
}

#[derive(Debug, Clone)]
pub struct PrepRequest {
    pub aoi_name: String,
    /// Tile side in meters, validated before the request is built
    pub tile_size: TileSize,
    pub source: AoiSource,
    pub out_dir: PathBuf,
    pub pretty: bool,
}

#[derive(Debug, Clone)]
pub struct PrepSummary {
    /// Lowercased AOI name used for lookups and file names
    pub aoi_name: String,
    /// Only set when the boundary was resolved from an admin dataset
    pub boundary: Option<ExtractedBoundary>,
    pub tiles: GeneratedTiles,
}

/// Upper-case the first character, lower-case the rest.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn run(request: &PrepRequest) -> Result<PrepSummary> {
    let size = request.tile_size;
    let aoi_name = request.aoi_name.to_lowercase();

    fs::create_dir_all(&request.out_dir).map_err(|source| PrepError::Write {
        path: request.out_dir.clone(),
        source,
    })?;

    let (boundary_path, boundary) = match &request.source {
        AoiSource::Admin(adm_path) => {
            let extracted =
                extract_boundary(adm_path, &aoi_name, &request.out_dir, request.pretty)?;
            (extracted.path.clone(), Some(extracted))
        }
        AoiSource::Boundary(path) => (path.clone(), None),
    };

    info!(
        "Generating {} m tiles for {} from {}",
        size.get(),
        aoi_name,
        boundary_path.display()
    );
    let tiles = generate_tiles(
        &boundary_path,
        size,
        &aoi_name,
        &request.out_dir,
        request.pretty,
    )?;

    Ok(PrepSummary {
        aoi_name,
        boundary,
        tiles,
    })
}

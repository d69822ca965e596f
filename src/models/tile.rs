//! Tile grid output types.

use geo::{Polygon, Rect};

/// One square cell of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Column index, increasing eastward from 0
    pub h: usize,
    /// Row index, increasing southward from 0
    pub v: usize,
    /// Whether the tile intersects the AOI boundary
    pub mask: bool,
    pub polygon: Polygon<f64>,
}

/// All tiles generated for one AOI, sharing a projected CRS.
#[derive(Debug, Clone)]
pub struct TileGrid {
    /// EPSG code of the UTM zone the tiles are expressed in
    pub epsg: u32,
    /// Snapped extent covered by the tiles
    pub extent: Rect<f64>,
    pub nx: usize,
    pub ny: usize,
    /// Tiles in row-major order by `h`, then `v`
    pub tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of tiles intersecting the boundary
    pub fn masked_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.mask).count()
    }
}

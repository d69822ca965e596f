//! aoitiles - UTM tile grids over an area of interest
//!
//! This library provides the boundary resolver, tile grid generator and shared
//! types used by the `prep_tiles` binary.

pub mod config;
pub mod error;
pub mod grid;
pub mod models;
pub mod pipeline;
pub mod projection;
pub mod resolver;
pub mod vector;

pub use error::{PrepError, Result};
pub use grid::{build_tile_grid, generate_tiles, GridLayout, TileSize};
pub use models::{BoundaryDataset, BoundaryRecord, Tile, TileGrid};
pub use projection::{get_utm_zone, Reprojector, UtmZone};
pub use resolver::{extract_boundary, resolve_boundary};

//! Core data models for boundary resolution and tiling.

pub mod boundary;
pub mod tile;

pub use boundary::{BoundaryDataset, BoundaryRecord};
pub use tile::{Tile, TileGrid};

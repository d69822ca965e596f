//! GeoJSON reading and writing.

mod reader;
mod writer;

pub use reader::{declared_epsg, read_dataset};
pub use writer::{write_boundary, write_tiles};

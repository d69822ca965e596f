//! Error type shared by the resolver and the tile generator.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepError {
    /// The administrative dataset has no `ADM1_xx` name column.
    #[error(
        "no ADM1 name column (ADM1_ + 2-letter language code) in '{path}'; columns: {columns:?}"
    )]
    Configuration { path: PathBuf, columns: Vec<String> },

    #[error("failed to read geometry from '{path}': {reason}")]
    GeometryRead { path: PathBuf, reason: String },

    #[error("invalid tile size {0}: must be a positive integer number of meters")]
    InvalidTileSize(i64),

    #[error("failed to reproject into EPSG:{epsg}: {reason}")]
    Reprojection { epsg: u32, reason: String },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file '{path}': {reason}")]
    Config { path: PathBuf, reason: String },
}

impl PrepError {
    pub(crate) fn geometry_read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        PrepError::GeometryRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PrepError>;

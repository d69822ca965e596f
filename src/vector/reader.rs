use std::fs;
use std::path::Path;

use geojson::{Feature, GeoJson, JsonObject};
use tracing::{debug, warn};

use crate::error::{PrepError, Result};
use crate::models::{BoundaryDataset, BoundaryRecord};
use crate::projection::EPSG_WGS84;

/// Load a GeoJSON file as a boundary dataset.
///
/// Accepts a FeatureCollection, a single Feature, or a bare Geometry.
/// Coordinates are always taken as EPSG:4326 lon/lat.
pub fn read_dataset(path: &Path) -> Result<BoundaryDataset> {
    let content = fs::read_to_string(path).map_err(|e| PrepError::geometry_read(path, e))?;
    let geojson: GeoJson = content
        .parse()
        .map_err(|e| PrepError::geometry_read(path, e))?;

    let features = match geojson {
        GeoJson::FeatureCollection(fc) => {
            if let Some(epsg) = declared_epsg(fc.foreign_members.as_ref()) {
                if epsg != EPSG_WGS84 {
                    warn!(
                        "{} declares EPSG:{}, treating coordinates as EPSG:{}",
                        path.display(),
                        epsg,
                        EPSG_WGS84
                    );
                }
            }
            fc.features
        }
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => vec![Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: None,
            foreign_members: None,
        }],
    };

    let records = features
        .into_iter()
        .enumerate()
        .map(|(i, feature)| to_record(path, i, feature))
        .collect::<Result<Vec<_>>>()?;

    debug!("Read {} records from {}", records.len(), path.display());

    Ok(BoundaryDataset::new(records))
}

fn to_record(path: &Path, index: usize, feature: Feature) -> Result<BoundaryRecord> {
    let geometry = match feature.geometry {
        Some(g) => Some(geo::Geometry::<f64>::try_from(g).map_err(|e| {
            PrepError::geometry_read(path, format!("feature {}: {}", index, e))
        })?),
        None => None,
    };

    Ok(BoundaryRecord::new(
        geometry,
        feature.properties.unwrap_or_default(),
    ))
}

/// EPSG code named by a legacy `crs` member, if any.
pub fn declared_epsg(foreign_members: Option<&JsonObject>) -> Option<u32> {
    let name = foreign_members?
        .get("crs")?
        .get("properties")?
        .get("name")?
        .as_str()?;

    if name.ends_with("CRS84") {
        return Some(EPSG_WGS84);
    }
    name.rsplit(':').next()?.parse().ok()
}

//! UTM zone selection and reprojection out of WGS84.
//!
//! Zone choice uses the centre of the AOI bounding box (mean of the extremes
//! on each axis), not the area centroid.

use geo::{Coord, MapCoords, MultiPolygon, Rect};
use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use tracing::debug;

use crate::error::{PrepError, Result};

/// WGS84 geographic (longitude/latitude in degrees)
pub const EPSG_WGS84: u32 = 4326;

const WGS84_PROJ: &str = "+proj=longlat +datum=WGS84 +no_defs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
}

/// A UTM zone on the WGS84 datum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtmZone {
    /// Zone number, 1-60
    pub zone: u8,
    pub hemisphere: Hemisphere,
}

impl UtmZone {
    /// Zone containing `lon`, hemisphere from the sign of `lat` (0 is north).
    pub fn from_lat_lon(lat: f64, lon: f64) -> Self {
        let zone = (((lon + 180.0) / 6.0).floor() as i64).rem_euclid(60) + 1;
        let hemisphere = if lat >= 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        };
        Self {
            zone: zone as u8,
            hemisphere,
        }
    }

    /// Zone for the centre of a lon/lat bounding box.
    pub fn for_bounds(bounds: &Rect<f64>) -> Self {
        let lat_ctr = (bounds.min().y + bounds.max().y) / 2.0;
        let lon_ctr = (bounds.min().x + bounds.max().x) / 2.0;
        Self::from_lat_lon(lat_ctr, lon_ctr)
    }

    /// EPSG code: 326xx for the north, 327xx for the south.
    pub fn epsg(&self) -> u32 {
        let base = match self.hemisphere {
            Hemisphere::North => 32600,
            Hemisphere::South => 32700,
        };
        base + u32::from(self.zone)
    }

    pub fn proj_string(&self) -> String {
        match self.hemisphere {
            Hemisphere::North => format!(
                "+proj=utm +zone={} +datum=WGS84 +units=m +no_defs",
                self.zone
            ),
            Hemisphere::South => format!(
                "+proj=utm +zone={} +south +datum=WGS84 +units=m +no_defs",
                self.zone
            ),
        }
    }
}

/// Returns `(zone, epsg)` for a latitude/longitude in degrees.
pub fn get_utm_zone(lat: f64, lon: f64) -> (u8, u32) {
    let utm = UtmZone::from_lat_lon(lat, lon);
    (utm.zone, utm.epsg())
}

/// Reprojects lon/lat geometries into one UTM zone.
pub struct Reprojector {
    source: Proj,
    target: Proj,
    epsg: u32,
}

impl std::fmt::Debug for Reprojector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reprojector")
            .field("source_epsg", &EPSG_WGS84)
            .field("target_epsg", &self.epsg)
            .finish_non_exhaustive()
    }
}

impl Reprojector {
    pub fn wgs84_to(zone: UtmZone) -> Result<Self> {
        let epsg = zone.epsg();
        let source = Proj::from_proj_string(WGS84_PROJ).map_err(|e| PrepError::Reprojection {
            epsg: EPSG_WGS84,
            reason: format!("{e:?}"),
        })?;
        let target =
            Proj::from_proj_string(&zone.proj_string()).map_err(|e| PrepError::Reprojection {
                epsg,
                reason: format!("{e:?}"),
            })?;

        debug!("Reprojecting EPSG:{} -> EPSG:{}", EPSG_WGS84, epsg);

        Ok(Self {
            source,
            target,
            epsg,
        })
    }

    pub fn target_epsg(&self) -> u32 {
        self.epsg
    }

    /// Project a single lon/lat coordinate (degrees) to easting/northing (meters).
    pub fn project_coord(&self, coord: Coord<f64>) -> Result<Coord<f64>> {
        let mut point = (coord.x.to_radians(), coord.y.to_radians(), 0.0);

        transform(&self.source, &self.target, &mut point).map_err(|e| {
            PrepError::Reprojection {
                epsg: self.epsg,
                reason: format!("({}, {}): {e:?}", coord.x, coord.y),
            }
        })?;

        if !point.0.is_finite() || !point.1.is_finite() {
            return Err(PrepError::Reprojection {
                epsg: self.epsg,
                reason: format!("({}, {}) has no finite projection", coord.x, coord.y),
            });
        }

        Ok(Coord {
            x: point.0,
            y: point.1,
        })
    }

    pub fn project(&self, geometry: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
        geometry.try_map_coords(|coord| self.project_coord(coord))
    }
}

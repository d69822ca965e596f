use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use geojson::{feature::Id, Feature, FeatureCollection, GeoJson, JsonObject, JsonValue};
use serde_json::json;

use crate::error::{PrepError, Result};
use crate::models::{BoundaryRecord, TileGrid};

/// Write selected boundary records, re-indexed from zero.
pub fn write_boundary(path: &Path, records: &[&BoundaryRecord], pretty: bool) -> Result<()> {
    let features = records
        .iter()
        .enumerate()
        .map(|(i, record)| Feature {
            bbox: None,
            geometry: record.geometry.as_ref().map(|g| geojson::Geometry {
                bbox: None,
                value: geojson::Value::from(g),
                foreign_members: None,
            }),
            id: Some(Id::Number(i.into())),
            properties: Some(record.properties.clone()),
            foreign_members: None,
        })
        .collect::<Vec<Feature>>();

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    write_collection(path, collection, pretty)
}

/// Write a tile grid with `h`, `v`, `mask` properties and a legacy `crs` member.
///
/// The collection `bbox` is the snapped grid extent; an empty grid has none.
pub fn write_tiles(path: &Path, grid: &TileGrid, pretty: bool) -> Result<()> {
    let features = grid
        .tiles
        .iter()
        .enumerate()
        .map(|(i, tile)| {
            let mut properties = JsonObject::new();
            properties.insert(String::from("h"), JsonValue::from(tile.h));
            properties.insert(String::from("v"), JsonValue::from(tile.v));
            properties.insert(String::from("mask"), JsonValue::from(u8::from(tile.mask)));

            Feature {
                bbox: None,
                geometry: Some(geojson::Geometry {
                    bbox: None,
                    value: geojson::Value::from(&tile.polygon),
                    foreign_members: None,
                }),
                id: Some(Id::Number(i.into())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect::<Vec<Feature>>();

    let mut foreign_members = JsonObject::new();
    foreign_members.insert(
        String::from("crs"),
        json!({
            "type": "name",
            "properties": { "name": format!("urn:ogc:def:crs:EPSG::{}", grid.epsg) }
        }),
    );

    let bbox = (!grid.is_empty()).then(|| {
        let (min, max) = (grid.extent.min(), grid.extent.max());
        vec![min.x, min.y, max.x, max.y]
    });

    let collection = FeatureCollection {
        bbox,
        features,
        foreign_members: Some(foreign_members),
    };

    write_collection(path, collection, pretty)
}

fn write_collection(path: &Path, collection: FeatureCollection, pretty: bool) -> Result<()> {
    let to_write_error = |source: io::Error| PrepError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_write_error)?;
    let mut writer = BufWriter::new(file);
    let geojson = GeoJson::from(collection);

    let serialized = if pretty {
        serde_json::to_writer_pretty(&mut writer, &geojson)
    } else {
        serde_json::to_writer(&mut writer, &geojson)
    };
    serialized.map_err(|e| to_write_error(e.into()))?;

    writer.flush().map_err(to_write_error)
}

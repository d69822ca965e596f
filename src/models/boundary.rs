//! Administrative boundary records as loaded from a vector file.

use geo::{Geometry, MultiPolygon};
use serde_json::{Map, Value};

/// A single boundary feature: geometry plus its attribute table row.
#[derive(Debug, Clone)]
pub struct BoundaryRecord {
    /// Geometry in EPSG:4326 (lon/lat). `None` for features with a null geometry.
    pub geometry: Option<Geometry<f64>>,

    /// Attribute values keyed by column name, in file order.
    pub properties: Map<String, Value>,
}

impl BoundaryRecord {
    pub fn new(geometry: Option<Geometry<f64>>, properties: Map<String, Value>) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// String value of an attribute column, if present and textual.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.properties.get(column).and_then(Value::as_str)
    }

    /// Geometry as a multipolygon, if it is polygonal.
    pub fn polygonal(&self) -> Option<MultiPolygon<f64>> {
        match self.geometry.as_ref()? {
            Geometry::Polygon(p) => Some(MultiPolygon::new(vec![p.clone()])),
            Geometry::MultiPolygon(mp) => Some(mp.clone()),
            _ => None,
        }
    }
}

/// Ordered collection of boundary records sharing one attribute schema.
#[derive(Debug, Clone, Default)]
pub struct BoundaryDataset {
    pub records: Vec<BoundaryRecord>,
}

impl BoundaryDataset {
    pub fn new(records: Vec<BoundaryRecord>) -> Self {
        Self { records }
    }

    /// Column names in order of first appearance across records.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for record in &self.records {
            for key in record.properties.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&BoundaryRecord> {
        self.records.first()
    }
}

//! Boundary extraction from an administrative dataset by region name.
//!
//! The first-level admin name column is located by pattern, every record's
//! name is normalized (ASCII, lowercase) into a separate key map, and all
//! records whose key equals the normalized target are written out.

mod columns;
mod normalize;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub use columns::{detect_adm1_column, Adm1Column};
pub use normalize::{normalize_name, normalized_names};

use crate::error::{PrepError, Result};
use crate::models::{BoundaryDataset, BoundaryRecord};
use crate::vector::{read_dataset, write_boundary};

/// Records matching a region name.
#[derive(Debug)]
pub struct Resolution<'a> {
    /// Column the names were read from
    pub column: String,
    /// Normalized target name
    pub target: String,
    /// Matching records in dataset order
    pub records: Vec<&'a BoundaryRecord>,
}

/// Summary of a written boundary file.
#[derive(Debug, Clone)]
pub struct ExtractedBoundary {
    pub path: PathBuf,
    pub column: String,
    pub matched: usize,
}

pub fn boundary_file_name(aoi_name: &str) -> String {
    format!("{}_boundary.geojson", aoi_name)
}

/// Select every record whose normalized ADM1 name equals `target`.
///
/// No match is not an error here; the caller decides whether an empty
/// boundary is acceptable.
pub fn resolve_boundary<'a>(
    dataset: &'a BoundaryDataset,
    source: &Path,
    target: &str,
) -> Result<Resolution<'a>> {
    let adm1 = detect_adm1_column(&dataset.columns());
    if let Adm1Column::Ambiguous { chosen, candidates } = &adm1 {
        warn!(
            "Multiple ADM1 name columns in {}: {:?}, using {}",
            source.display(),
            candidates,
            chosen
        );
    }
    let column = adm1
        .column()
        .map(str::to_string)
        .ok_or_else(|| PrepError::Configuration {
            path: source.to_path_buf(),
            columns: dataset.columns(),
        })?;
    info!("ADM1 name column: {}", column);

    let target = normalize_name(target);
    let keys = normalized_names(dataset, &column);

    let records: Vec<&BoundaryRecord> = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(i, _)| keys.get(i) == Some(&target))
        .map(|(_, record)| record)
        .collect();

    if records.is_empty() {
        warn!(
            "0 boundary records matched '{}' in column {} of {} ({} records)",
            target,
            column,
            source.display(),
            dataset.len()
        );
    } else {
        info!("{} boundary record(s) matched '{}'", records.len(), target);
    }

    Ok(Resolution {
        column,
        target,
        records,
    })
}

/// Read an admin dataset, resolve `aoi_name`, and write
/// `{aoi_name}_boundary.geojson` into `out_dir`.
pub fn extract_boundary(
    adm_path: &Path,
    aoi_name: &str,
    out_dir: &Path,
    pretty: bool,
) -> Result<ExtractedBoundary> {
    info!("Resolving '{}' in {}", aoi_name, adm_path.display());

    let dataset = read_dataset(adm_path)?;
    let resolution = resolve_boundary(&dataset, adm_path, aoi_name)?;

    let path = out_dir.join(boundary_file_name(aoi_name));
    write_boundary(&path, &resolution.records, pretty)?;
    info!(
        "Wrote {} boundary record(s) to {}",
        resolution.records.len(),
        path.display()
    );

    Ok(ExtractedBoundary {
        path,
        column: resolution.column,
        matched: resolution.records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn dataset(rows: serde_json::Value) -> BoundaryDataset {
        let records = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|r| BoundaryRecord::new(None, r.as_object().cloned().unwrap()))
            .collect();
        BoundaryDataset::new(records)
    }

    #[test]
    fn test_matches_ignore_case_and_accents() {
        let ds = dataset(json!([
            {"ADM1_EN": "São Paulo", "ADM1_PCODE": "BR35"},
            {"ADM1_EN": "Paraná", "ADM1_PCODE": "BR41"},
            {"ADM1_EN": "SAO PAULO", "ADM1_PCODE": "BR35b"},
        ]));

        let resolution = resolve_boundary(&ds, Path::new("adm1.geojson"), "sao paulo").unwrap();
        assert_eq!(resolution.column, "ADM1_EN");
        assert_eq!(resolution.target, "sao paulo");
        assert_eq!(resolution.records.len(), 2);
        assert_eq!(resolution.records[0].text("ADM1_PCODE"), Some("BR35"));
        assert_eq!(resolution.records[1].text("ADM1_PCODE"), Some("BR35b"));
    }

    #[test]
    fn test_target_is_normalized_too() {
        let ds = dataset(json!([{"ADM1_EN": "Paraná"}]));
        let resolution = resolve_boundary(&ds, Path::new("adm1.geojson"), "Paraná").unwrap();
        assert_eq!(resolution.records.len(), 1);
    }

    #[test]
    fn test_zero_matches_is_empty_not_error() {
        let ds = dataset(json!([{"ADM1_EN": "Texas"}]));
        let resolution = resolve_boundary(&ds, Path::new("adm1.geojson"), "ohio").unwrap();
        assert!(resolution.records.is_empty());
    }

    #[test]
    fn test_missing_column_is_configuration_error() {
        let ds = dataset(json!([{"NAME_1": "Texas"}]));
        let err = resolve_boundary(&ds, Path::new("adm1.geojson"), "texas").unwrap_err();
        match err {
            PrepError::Configuration { columns, .. } => assert_eq!(columns, vec!["NAME_1"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ambiguous_column_uses_first() {
        let ds = dataset(json!([
            {"ADM1_ES": "Región Uno", "ADM1_EN": "Region One"},
        ]));
        let resolution = resolve_boundary(&ds, Path::new("adm1.geojson"), "region uno").unwrap();
        assert_eq!(resolution.column, "ADM1_ES");
        assert_eq!(resolution.records.len(), 1);
    }

    #[test]
    fn test_extract_boundary_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let adm_path = dir.path().join("adm1.geojson");
        let mut file = std::fs::File::create(&adm_path).unwrap();
        write!(
            file,
            "{}",
            json!({
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": {"ADM1_EN": "Ceará"},
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [[[-41, -8], [-37, -8], [-37, -3], [-41, -3], [-41, -8]]]
                        }
                    },
                    {
                        "type": "Feature",
                        "properties": {"ADM1_EN": "Piauí"},
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [
                                [[-46, -11], [-41, -11], [-41, -3], [-46, -3], [-46, -11]]
                            ]
                        }
                    }
                ]
            })
        )
        .unwrap();

        let extracted = extract_boundary(&adm_path, "ceara", dir.path(), false).unwrap();
        assert_eq!(extracted.matched, 1);
        assert_eq!(extracted.column, "ADM1_EN");
        assert_eq!(extracted.path, dir.path().join("ceara_boundary.geojson"));

        let written = read_dataset(&extracted.path).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written.records[0].text("ADM1_EN"), Some("Ceará"));
    }
}

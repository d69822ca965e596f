use std::collections::HashMap;

use deunicode::deunicode;

use crate::models::BoundaryDataset;

/// ASCII-transliterate and lowercase a region name for comparison.
pub fn normalize_name(name: &str) -> String {
    deunicode(name).to_lowercase()
}

/// Normalized name key per record index. Records without a textual value in
/// `column` have no entry.
pub fn normalized_names(dataset: &BoundaryDataset, column: &str) -> HashMap<usize, String> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter_map(|(i, record)| record.text(column).map(|name| (i, normalize_name(name))))
        .collect()
}

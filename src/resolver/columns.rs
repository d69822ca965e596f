use std::sync::OnceLock;

use regex::Regex;

/// Outcome of looking for the first-level admin name column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adm1Column {
    Found(String),
    /// Several columns matched; `chosen` is the first in column order.
    Ambiguous {
        chosen: String,
        candidates: Vec<String>,
    },
    Missing,
}

impl Adm1Column {
    pub fn column(&self) -> Option<&str> {
        match self {
            Adm1Column::Found(c) => Some(c),
            Adm1Column::Ambiguous { chosen, .. } => Some(chosen),
            Adm1Column::Missing => None,
        }
    }
}

fn adm1_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^ADM1_[A-Z]{2}$").expect("ADM1 column pattern is valid")
    })
}

/// Find columns named `ADM1_` plus a two-letter upper-case language code
/// (`ADM1_EN`, `ADM1_FR`).
pub fn detect_adm1_column(columns: &[String]) -> Adm1Column {
    let mut candidates: Vec<String> = columns
        .iter()
        .filter(|c| adm1_pattern().is_match(c))
        .cloned()
        .collect();

    match candidates.len() {
        0 => Adm1Column::Missing,
        1 => Adm1Column::Found(candidates.remove(0)),
        _ => Adm1Column::Ambiguous {
            chosen: candidates[0].clone(),
            candidates,
        },
    }
}

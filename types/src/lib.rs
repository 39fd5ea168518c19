use serde::{Deserialize, Serialize};

// ── Location set ─────────────────────────────────────────────────────────

/// The aliases a gazetteer tier records for one province.
///
/// Dataset files write either a JSON array (several city names, abbreviations,
/// ...) or a bare string (a single short form). The shape is resolved once when
/// the file is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationSet {
    /// `"江苏": ["南京市", "苏州市", ...]`
    MultiAlias(Vec<String>),
    /// `"江苏": "苏"`
    SingleAlias(String),
}

impl LocationSet {
    /// Aliases in the order they are tried: longest first, stable for ties.
    pub fn aliases_by_length(&self) -> Vec<String> {
        match self {
            LocationSet::MultiAlias(aliases) => {
                let mut sorted = aliases.clone();
                sorted.sort_by_key(|a| std::cmp::Reverse(a.chars().count()));
                sorted
            }
            LocationSet::SingleAlias(alias) => vec![alias.clone()],
        }
    }
}

// ── Match results ────────────────────────────────────────────────────────

/// Where a province was found in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceMatch {
    pub province: String,
    /// Name of the gazetteer tier that produced the match, e.g. "省市"
    pub tier: String,
    /// The alias that occurred in the text
    pub alias: String,
    /// Character offset of the rightmost occurrence of `alias`
    pub char_offset: usize,
}

/// The two derived fields for one notice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl Annotation {
    pub fn is_empty(&self) -> bool {
        self.province.is_none() && self.entity.is_none()
    }
}

// ── Per-sheet report ─────────────────────────────────────────────────────

/// Outcome of annotating one sheet (one CSV file).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetReport {
    pub sheet: String,
    /// Data rows seen (header and title rows excluded)
    pub rows: usize,
    pub province_hits: usize,
    pub entity_hits: usize,
    /// Rows with notice text that yielded neither field
    #[serde(default)]
    pub unmatched: usize,
    /// Set when the sheet was passed through or could not be processed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

//! Where the reference datasets live and which columns the annotator reads
//! and writes.
//!
//! The dataset manifest lists gazetteer tiers in match-priority order. A
//! `datasets.json` file in the data directory replaces the built-in manifest:
//!
//! ```json
//! {
//!   "tiers": [{ "name": "省市", "file": "locations/province_city.json" }],
//!   "entity_keywords": "keywords/entity_keywords.json",
//!   "ignore_keywords": "keywords/ignore_keywords.json"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LoadError;

pub const MANIFEST_FILE: &str = "datasets.json";

/// Built-in gazetteer tiers, most specific first.
const DEFAULT_TIERS: &[(&str, &str)] = &[
    ("省市", "locations/province_city.json"),
    ("省市简", "locations/province_city_short.json"),
    ("省", "locations/province.json"),
];

const DEFAULT_ENTITY_KEYWORDS: &str = "keywords/entity_keywords.json";
const DEFAULT_IGNORE_KEYWORDS: &str = "keywords/ignore_keywords.json";

// ── Dataset manifest ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TierFile {
    pub name: String,
    pub file: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    tiers: Vec<TierFile>,
    #[serde(default = "default_entity_keywords")]
    entity_keywords: PathBuf,
    #[serde(default = "default_ignore_keywords")]
    ignore_keywords: PathBuf,
}

fn default_entity_keywords() -> PathBuf {
    PathBuf::from(DEFAULT_ENTITY_KEYWORDS)
}

fn default_ignore_keywords() -> PathBuf {
    PathBuf::from(DEFAULT_IGNORE_KEYWORDS)
}

/// Resolved dataset locations. All paths are absolute or relative to the
/// working directory (already joined with the data directory).
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub tiers: Vec<TierFile>,
    pub entity_keywords: PathBuf,
    pub ignore_keywords: PathBuf,
}

impl DatasetConfig {
    /// Built-in manifest rooted at `data_dir`.
    pub fn with_defaults(data_dir: &Path) -> Self {
        DatasetConfig {
            tiers: DEFAULT_TIERS
                .iter()
                .map(|(name, file)| TierFile {
                    name: name.to_string(),
                    file: data_dir.join(file),
                })
                .collect(),
            entity_keywords: data_dir.join(DEFAULT_ENTITY_KEYWORDS),
            ignore_keywords: data_dir.join(DEFAULT_IGNORE_KEYWORDS),
        }
    }

    /// Read `datasets.json` from `data_dir` if present, otherwise fall back
    /// to the built-in manifest.
    pub fn from_data_dir(data_dir: &Path) -> Result<Self, LoadError> {
        let manifest_path = data_dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Ok(Self::with_defaults(data_dir));
        }

        let json = std::fs::read_to_string(&manifest_path).map_err(|source| LoadError::Io {
            path: manifest_path.clone(),
            source,
        })?;
        let manifest: Manifest = serde_json::from_str(&json).map_err(|source| LoadError::Json {
            path: manifest_path.clone(),
            source,
        })?;

        tracing::debug!(
            path = %manifest_path.display(),
            tiers = manifest.tiers.len(),
            "using dataset manifest"
        );

        Ok(DatasetConfig {
            tiers: manifest
                .tiers
                .into_iter()
                .map(|t| TierFile {
                    name: t.name,
                    file: data_dir.join(t.file),
                })
                .collect(),
            entity_keywords: data_dir.join(manifest.entity_keywords),
            ignore_keywords: data_dir.join(manifest.ignore_keywords),
        })
    }
}

// ── Column names ─────────────────────────────────────────────────────

/// Column names used when annotating a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConfig {
    /// Free-text notice column that both matchers read
    pub text: String,
    /// The province column is inserted right after this one
    pub anchor: String,
    pub province: String,
    pub entity: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            text: "招标信息".to_string(),
            anchor: "招标时间".to_string(),
            province: "所属省份".to_string(),
            entity: "承建单位".to_string(),
        }
    }
}

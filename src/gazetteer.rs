//! Layered province gazetteer.
//!
//! A gazetteer is an ordered list of tiers. Each tier maps a canonical
//! province name to the aliases that identify it at that level of detail:
//! full city names first, short city names next, bare province short forms
//! last. Tier order decides precedence and never changes after loading.

use std::path::Path;

use serde_json::Value;
use tender_types::LocationSet;

use crate::config::DatasetConfig;
use crate::error::LoadError;

// ── Entries ──────────────────────────────────────────────────────────

/// One province within a tier, with its aliases pre-sorted for matching.
#[derive(Debug, Clone)]
pub struct ProvinceEntry {
    pub province: String,
    pub locations: LocationSet,
    /// `locations` in trial order (longest first)
    ordered: Vec<String>,
}

impl ProvinceEntry {
    pub fn new(province: impl Into<String>, locations: LocationSet) -> Self {
        let ordered = locations.aliases_by_length();
        ProvinceEntry {
            province: province.into(),
            locations,
            ordered,
        }
    }

    /// Aliases in the order the locator tries them.
    pub fn aliases(&self) -> &[String] {
        &self.ordered
    }
}

#[derive(Debug, Clone)]
pub struct Tier {
    pub name: String,
    /// Provinces in dataset order
    pub provinces: Vec<ProvinceEntry>,
}

impl Tier {
    pub fn new(name: impl Into<String>, provinces: Vec<ProvinceEntry>) -> Self {
        Tier {
            name: name.into(),
            provinces,
        }
    }

    /// Parse a tier from its JSON text. `path` is only used in error messages.
    pub fn from_json_str(name: &str, json: &str, path: &Path) -> Result<Self, LoadError> {
        let root: Value = serde_json::from_str(json).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let Value::Object(map) = root else {
            return Err(LoadError::NotAnObject {
                path: path.to_path_buf(),
            });
        };

        // `preserve_order` keeps provinces in file order
        let mut provinces = Vec::with_capacity(map.len());
        for (province, value) in map {
            let locations: LocationSet =
                serde_json::from_value(value).map_err(|_| LoadError::BadLocationSet {
                    path: path.to_path_buf(),
                    province: province.clone(),
                })?;
            provinces.push(ProvinceEntry::new(province, locations));
        }

        Ok(Tier::new(name, provinces))
    }

    pub fn load(name: &str, path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(name, &json, path)
    }
}

// ── Gazetteer ────────────────────────────────────────────────────────

/// Immutable, tier-ordered location data. Build once and share by reference.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    tiers: Vec<Tier>,
}

impl Gazetteer {
    pub fn new(tiers: Vec<Tier>) -> Self {
        Gazetteer { tiers }
    }

    /// Load every tier listed in the manifest, in manifest order.
    pub fn load(config: &DatasetConfig) -> Result<Self, LoadError> {
        let mut tiers = Vec::with_capacity(config.tiers.len());
        for tier_file in &config.tiers {
            let tier = Tier::load(&tier_file.name, &tier_file.file)?;
            tracing::debug!(
                tier = %tier.name,
                provinces = tier.provinces.len(),
                "loaded gazetteer tier"
            );
            tiers.push(tier);
        }
        Ok(Gazetteer { tiers })
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Total number of aliases across all tiers.
    pub fn alias_count(&self) -> usize {
        self.tiers
            .iter()
            .flat_map(|t| &t.provinces)
            .map(|p| p.ordered.len())
            .sum()
    }
}

/// The datasets shipped under `data/`.
#[cfg(test)]
pub(crate) fn bundled() -> Gazetteer {
    let data = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    Gazetteer::load(&DatasetConfig::with_defaults(&data)).expect("bundled datasets")
}

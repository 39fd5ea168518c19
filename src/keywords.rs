use std::path::Path;

use crate::config::DatasetConfig;
use crate::error::LoadError;

/// Trigger and suppression keywords for entity extraction.
///
/// `entity` is tried in order; the first keyword has top priority.
/// A candidate containing any `ignore` keyword is rejected in the strict pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSets {
    pub entity: Vec<String>,
    pub ignore: Vec<String>,
}

impl KeywordSets {
    pub fn new(entity: Vec<String>, ignore: Vec<String>) -> Self {
        KeywordSets { entity, ignore }
    }

    /// Load both lists. A missing ignore list is tolerated and treated as empty.
    pub fn load(config: &DatasetConfig) -> Result<Self, LoadError> {
        let entity = read_keyword_list(&config.entity_keywords)?;

        let ignore = if config.ignore_keywords.is_file() {
            read_keyword_list(&config.ignore_keywords)?
        } else {
            tracing::warn!(
                path = %config.ignore_keywords.display(),
                "ignore keyword list not found, suppression disabled"
            );
            Vec::new()
        };

        tracing::debug!(
            entity = entity.len(),
            ignore = ignore.len(),
            "loaded keyword sets"
        );
        Ok(KeywordSets { entity, ignore })
    }
}

/// Read a JSON array of strings.
fn read_keyword_list(path: &Path) -> Result<Vec<String>, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_ignore_list_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = DatasetConfig::with_defaults(dir.path());
        cfg.entity_keywords = dir.path().join("entity.json");
        std::fs::write(&cfg.entity_keywords, r#"["有限公司", "集团"]"#).unwrap();

        let sets = KeywordSets::load(&cfg).unwrap();
        assert_eq!(sets.entity, vec!["有限公司", "集团"]);
        assert!(sets.ignore.is_empty());
    }

    #[test]
    fn test_missing_entity_list_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DatasetConfig::with_defaults(dir.path());
        assert!(matches!(
            KeywordSets::load(&cfg),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn test_keyword_list_must_be_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("k.json");
        std::fs::write(&path, r#"{"a": 1}"#).unwrap();
        assert!(matches!(
            read_keyword_list(&path),
            Err(LoadError::Json { .. })
        ));
    }

    #[test]
    fn test_bundled_keywords_load() {
        let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
        let sets = KeywordSets::load(&DatasetConfig::with_defaults(&data)).unwrap();
        assert!(!sets.entity.is_empty());
        assert!(!sets.ignore.is_empty());
    }
}

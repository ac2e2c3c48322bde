//! Declarative provider records and the files that hold them.
//!
//! A provider file is a JSON (or YAML) list of records:
//!
//! ```json
//! [
//!   {"class": "app::mail::MailProvider", "config": {"HOST": "smtp"}, "kwargs": {"name": "mail"}}
//! ]
//! ```
//!
//! Without an explicit path, `.{L}.json`, `{L}.json` and `~/.{L}.json` are
//! probed in that order, where `L` is the library name.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::provider::ConfigMap;

/// One declarative provider entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    /// Qualified type identifier, `unit::TypeName`.
    #[serde(rename = "class", default)]
    pub class_path: String,

    /// Instance configuration, filtered to the class's config keys.
    #[serde(default)]
    pub config: ConfigMap,

    /// Construction keyword arguments.
    #[serde(default)]
    pub kwargs: ConfigMap,
}

impl ProviderRecord {
    pub fn new(class_path: impl Into<String>) -> Self {
        Self {
            class_path: class_path.into(),
            ..Default::default()
        }
    }

    pub fn with_config(mut self, config: ConfigMap) -> Self {
        self.config = config;
        self
    }

    pub fn with_kwargs(mut self, kwargs: ConfigMap) -> Self {
        self.kwargs = kwargs;
        self
    }
}

/// Where to read declarative records from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigFile {
    /// A specific file.
    Path(PathBuf),
    /// The first existing file of a search list.
    Search(Vec<PathBuf>),
}

impl ConfigFile {
    /// Probe the default locations for library `lib_name`.
    pub fn search(lib_name: &str) -> Self {
        ConfigFile::Search(default_search_paths(lib_name))
    }

    /// The file to read, if any exists.
    pub fn locate(&self) -> Option<PathBuf> {
        match self {
            ConfigFile::Path(path) => Some(path.clone()),
            ConfigFile::Search(paths) => paths.iter().find(|p| p.exists()).cloned(),
        }
    }
}

/// `.{L}.json`, `{L}.json`, `~/.{L}.json`.
pub fn default_search_paths(lib_name: &str) -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from(format!(".{}.json", lib_name)),
        PathBuf::from(format!("{}.json", lib_name)),
    ];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{}.json", lib_name)));
    }
    paths
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml") | Some("yaml")
    )
}

/// Parse a provider file into records.
///
/// The top level must be a list. Entries that are not valid records (for
/// example a non-object `config`) are skipped and logged.
pub fn read_records(path: &Path) -> Result<Vec<ProviderRecord>> {
    let content = fs::read_to_string(path)?;

    let parse_error = |message: String| ProviderError::ConfigParseError {
        path: path.to_path_buf(),
        message,
    };

    let value: Value = if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?
    } else {
        serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?
    };

    let Value::Array(entries) = value else {
        return Err(parse_error("expected a list of provider records".to_string()));
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("Skipping record {} in {}: {}", index, path.display(), e);
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn record_fields_default() {
        let record: ProviderRecord = serde_json::from_value(json!({"class": "a::B"})).unwrap();
        assert_eq!(record, ProviderRecord::new("a::B"));
    }

    #[test]
    fn record_rejects_non_object_config() {
        let result: std::result::Result<ProviderRecord, _> =
            serde_json::from_value(json!({"class": "a::B", "config": [1, 2]}));
        assert!(result.is_err());
    }

    #[test]
    fn default_search_order() {
        let paths = default_search_paths("acme");
        assert_eq!(paths[0], PathBuf::from(".acme.json"));
        assert_eq!(paths[1], PathBuf::from("acme.json"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(paths[2], home.join(".acme.json"));
        }
    }

    #[test]
    fn search_finds_first_existing() {
        let temp = TempDir::new().unwrap();
        let second = temp.path().join("second.json");
        fs::write(&second, "[]").unwrap();

        let search = ConfigFile::Search(vec![temp.path().join("first.json"), second.clone()]);
        assert_eq!(search.locate(), Some(second));

        let none = ConfigFile::Search(vec![temp.path().join("nope.json")]);
        assert_eq!(none.locate(), None);
    }

    #[test]
    fn reads_json_and_skips_bad_entries() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("providers.json");
        fs::write(
            &path,
            r#"[{"class": "a::B", "config": {"K": 1}}, {"class": "a::C", "config": "bad"}, 7]"#,
        )
        .unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].class_path, "a::B");
        assert_eq!(records[0].config.get("K"), Some(&json!(1)));
    }

    #[test]
    fn reads_yaml_by_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("providers.yaml");
        fs::write(&path, "- class: a::B\n  kwargs:\n    name: bee\n").unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records[0].kwargs.get("name"), Some(&json!("bee")));
    }

    #[test]
    fn non_list_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("providers.json");
        fs::write(&path, r#"{"class": "a::B"}"#).unwrap();

        let err = read_records(&path).unwrap_err();
        assert!(matches!(err, ProviderError::ConfigParseError { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("providers.json");
        fs::write(&path, "[{").unwrap();
        assert!(matches!(
            read_records(&path),
            Err(ProviderError::ConfigParseError { .. })
        ));
    }
}

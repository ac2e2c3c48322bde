//! Directory autodiscovery.
//!
//! Each `.rs` file under the scan root stands for a unit. With a base
//! namespace the unit is `{base}::{dirs}::{stem}`; without one, the
//! relative module path (`dirs::stem`) is matched against registered units
//! by suffix. A unit with a recorded source file only matches that file, and
//! a file left with more than one candidate unit is skipped. Provider types
//! defined directly in a matched unit are returned; types the unit merely
//! imports are not.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use walkdir::WalkDir;

use crate::error::{ProviderError, Result};
use crate::provider::{ProviderClass, PATH_SEPARATOR};
use crate::registry::TypeRegistry;

/// File names never scanned.
pub const DEFAULT_EXCLUDES: &[&str] = &["mod.rs", "lib.rs", "main.rs", "base.rs"];

/// Extra predicate deciding which provider types qualify.
pub type TypeFilter = Rc<dyn Fn(&ProviderClass) -> bool>;

/// How to scan a directory.
#[derive(Clone)]
pub struct DiscoverOptions {
    /// Unit namespace of the scan root.
    pub base_namespace: Option<String>,
    /// File names to skip.
    pub exclude: Vec<String>,
    /// Replaces the `Provider`-in-the-name rule of standalone scans.
    pub type_filter: Option<TypeFilter>,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            base_namespace: None,
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            type_filter: None,
        }
    }
}

impl DiscoverOptions {
    pub fn with_base_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.base_namespace = Some(namespace.into());
        self
    }

    pub fn with_exclude<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_type_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&ProviderClass) -> bool + 'static,
    {
        self.type_filter = Some(Rc::new(filter));
        self
    }

    fn qualifies(&self, class: &ProviderClass) -> bool {
        match (&self.type_filter, &self.base_namespace) {
            (Some(filter), _) => filter(class),
            (None, Some(_)) => true,
            (None, None) => class.type_name().contains("Provider"),
        }
    }
}

/// A provider type found by a directory scan.
#[derive(Debug, Clone)]
pub struct DiscoveredType {
    pub class: Rc<ProviderClass>,
    /// Source file, relative to the scan root.
    pub path: PathBuf,
    /// Unit the file was mapped to.
    pub unit: String,
}

/// Fail unless `root` is an existing directory.
pub fn check_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(ProviderError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(ProviderError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Source files to scan, sorted by path.
fn source_files(root: &Path, exclude: &[String]) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "rs"))
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            !name.starts_with('_') && !exclude.iter().any(|e| e.as_str() == name.as_ref())
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// `a/b/c.rs` becomes `a::b::c`.
pub fn module_path(relative: &Path) -> Option<String> {
    let stem = relative.file_stem()?.to_str()?;
    let mut parts: Vec<&str> = match relative.parent() {
        Some(parent) => parent
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?,
        None => Vec::new(),
    };
    parts.push(stem);
    Some(parts.join(PATH_SEPARATOR))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// The one unit a standalone file stands for, if any.
fn standalone_unit(registry: &TypeRegistry, file: &Path, module: &str) -> Option<String> {
    let candidates: Vec<&str> = registry
        .units_matching(module)
        .filter(|unit| match registry.source(unit) {
            Some(source) => same_file(source, file),
            None => true,
        })
        .collect();

    match candidates.as_slice() {
        [unit] => Some(unit.to_string()),
        [] => None,
        units => {
            tracing::debug!(
                "Skipping {}: ambiguous unit ({})",
                file.display(),
                units.join(", ")
            );
            None
        }
    }
}

/// Find the provider types under `root`.
pub fn discover(
    registry: &TypeRegistry,
    root: &Path,
    options: &DiscoverOptions,
) -> Result<Vec<DiscoveredType>> {
    check_root(root)?;

    let mut found: Vec<DiscoveredType> = Vec::new();
    for file in source_files(root, &options.exclude) {
        let relative = file.strip_prefix(root).unwrap_or(&file).to_path_buf();
        let Some(module) = module_path(&relative) else {
            tracing::debug!("Skipping {}: not a valid module path", relative.display());
            continue;
        };

        let units: Vec<String> = match &options.base_namespace {
            Some(base) => {
                let unit = format!("{}{}{}", base, PATH_SEPARATOR, module);
                if registry.has_unit(&unit) {
                    vec![unit]
                } else {
                    Vec::new()
                }
            }
            None => standalone_unit(registry, &file, &module)
                .into_iter()
                .collect(),
        };
        if units.is_empty() {
            tracing::debug!("Skipping {}: no registered unit", relative.display());
            continue;
        }

        for unit in units {
            for entry in registry.members(&unit) {
                let Some(class) = entry.as_provider() else {
                    continue;
                };
                if class.is_contract() || class.module() != unit || !options.qualifies(class) {
                    continue;
                }
                if found
                    .iter()
                    .any(|d| d.class.qualified_name() == class.qualified_name())
                {
                    continue;
                }
                found.push(DiscoveredType {
                    class: Rc::clone(class),
                    path: relative.clone(),
                    unit: unit.clone(),
                });
            }
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "// provider\n").unwrap();
    }

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(ProviderClass::contract());
        let base = registry.register(ProviderClass::new("BaseProvider", "app::plugins::base"));
        registry.register(ProviderClass::new("MailProvider", "app::plugins::mail").with_name("mail"));
        registry.register(ProviderClass::new("Mailer", "app::plugins::mail").with_name("mailer"));
        registry.register_other("SmtpClient", "app::plugins::mail");
        registry.import("app::plugins::mail", &base.qualified_name());
        registry.register(
            ProviderClass::new("SmsProvider", "app::plugins::sms::twilio").with_name("twilio"),
        );
        registry
    }

    #[test]
    fn module_path_joins_dirs_and_stem() {
        assert_eq!(module_path(Path::new("sms/twilio.rs")).unwrap(), "sms::twilio");
        assert_eq!(module_path(Path::new("mail.rs")).unwrap(), "mail");
    }

    #[test]
    fn missing_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let err = discover(&registry(), &temp.path().join("nope"), &DiscoverOptions::default())
            .unwrap_err();
        assert!(matches!(err, ProviderError::DirectoryNotFound { .. }));
    }

    #[test]
    fn file_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "mail.rs");
        let err = discover(&registry(), &temp.path().join("mail.rs"), &DiscoverOptions::default())
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotADirectory { .. }));
    }

    #[test]
    fn excludes_and_underscore_files_are_skipped() {
        let temp = TempDir::new().unwrap();
        for file in ["mod.rs", "base.rs", "_private.rs", "mail.rs", "notes.txt"] {
            touch(temp.path(), file);
        }
        let files = source_files(temp.path(), &DiscoverOptions::default().exclude);
        assert_eq!(files, vec![temp.path().join("mail.rs")]);
    }

    #[test]
    fn base_namespace_maps_files_to_units() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "mail.rs");
        touch(temp.path(), "sms/twilio.rs");
        touch(temp.path(), "unregistered.rs");

        let options = DiscoverOptions::default().with_base_namespace("app::plugins");
        let found = discover(&registry(), temp.path(), &options).unwrap();

        let names: Vec<_> = found.iter().map(|d| d.class.type_name()).collect();
        assert_eq!(names, vec!["MailProvider", "Mailer", "SmsProvider"]);
        assert_eq!(found[2].path, PathBuf::from("sms/twilio.rs"));
        assert_eq!(found[2].unit, "app::plugins::sms::twilio");
    }

    #[test]
    fn standalone_scan_requires_provider_in_name() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "mail.rs");

        let found = discover(&registry(), temp.path(), &DiscoverOptions::default()).unwrap();
        let names: Vec<_> = found.iter().map(|d| d.class.type_name()).collect();
        assert_eq!(names, vec!["MailProvider"]);
        assert_eq!(found[0].unit, "app::plugins::mail");
    }

    #[test]
    fn standalone_file_matching_several_units_is_skipped() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "mail.rs");

        let mut registry = TypeRegistry::new();
        registry.register(ProviderClass::new("MailProvider", "app::v1::mail").with_name("v1"));
        registry.register(ProviderClass::new("MailProvider", "app::v2::mail").with_name("v2"));

        let found = discover(&registry, temp.path(), &DiscoverOptions::default()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn recorded_source_must_be_the_scanned_file() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "mail.rs");
        touch(temp.path(), "other/mail.rs");

        let mut registry = TypeRegistry::new();
        registry.register(ProviderClass::new("MailProvider", "app::v1::mail").with_name("v1"));
        registry.register(ProviderClass::new("MailProvider", "app::v2::mail").with_name("v2"));
        registry.set_source("app::v1::mail", temp.path().join("elsewhere.rs"));
        registry.set_source("app::v2::mail", temp.path().join("mail.rs"));

        let found = discover(&registry, temp.path(), &DiscoverOptions::default()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].unit, "app::v2::mail");
        assert_eq!(found[0].path, PathBuf::from("mail.rs"));
    }

    #[test]
    fn type_filter_replaces_name_rule() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "mail.rs");

        let options = DiscoverOptions::default().with_type_filter(|c| c.name() == "mailer");
        let found = discover(&registry(), temp.path(), &options).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].class.type_name(), "Mailer");
    }

    #[test]
    fn imported_types_are_not_discovered() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "mail.rs");

        let options = DiscoverOptions::default().with_base_namespace("app::plugins");
        let found = discover(&registry(), temp.path(), &options).unwrap();
        assert!(found.iter().all(|d| d.class.type_name() != "BaseProvider"));
    }
}

//! Building provider collections.
//!
//! A [`Loader`] turns one source into a [`ProviderMap`]:
//!
//! - [`Loader::from_records`] - declarative records
//! - [`Loader::from_file`] - records read from a JSON or YAML file
//! - [`Loader::from_dir`] - autodiscovery over a source directory
//! - [`Loader::from_library`] - autodiscovery over a library's bundled providers
//!
//! Bad records, unreadable files and providers that fail to construct are
//! skipped and logged at debug level. Only an invalid explicit scan root is
//! an error.

pub mod discover;
pub mod records;

use std::path::Path;
use std::rc::Rc;

use serde_json::Value;

use crate::error::Result;
use crate::provider::{ConfigMap, ProviderMap};
use crate::readiness::Probe;
use crate::registry::TypeRegistry;

pub use discover::{
    check_root, discover, module_path, DiscoverOptions, DiscoveredType, TypeFilter,
    DEFAULT_EXCLUDES,
};
pub use records::{default_search_paths, read_records, ConfigFile, ProviderRecord};

/// Builds providers from registered types.
pub struct Loader<'a> {
    registry: &'a TypeRegistry,
    probe: Rc<Probe>,
}

impl<'a> Loader<'a> {
    /// Create a loader. Every provider it builds shares `probe`.
    pub fn new(registry: &'a TypeRegistry, probe: Rc<Probe>) -> Self {
        Self { registry, probe }
    }

    pub fn registry(&self) -> &TypeRegistry {
        self.registry
    }

    /// Instantiate providers from declarative records, in order.
    ///
    /// A record is skipped if its class does not resolve to a provider type,
    /// if construction fails, or if the resulting name is empty. Later
    /// records replace earlier ones with the same lower-cased name.
    pub fn from_records(&self, records: &[ProviderRecord]) -> ProviderMap {
        let mut providers = ProviderMap::new();

        for record in records {
            if record.class_path.is_empty() {
                tracing::debug!("Skipping record without a class");
                continue;
            }

            let Some(entry) = self.registry.resolve(&record.class_path) else {
                tracing::debug!("Skipping '{}': type not found", record.class_path);
                continue;
            };
            let Some(class) = entry.as_provider() else {
                tracing::debug!("Skipping '{}': not a provider", record.class_path);
                continue;
            };

            let provider = match crate::provider::Provider::new(
                Rc::clone(class),
                Rc::clone(&self.probe),
                Some(&record.config),
                &record.kwargs,
            ) {
                Ok(provider) => provider,
                Err(e) => {
                    tracing::debug!("Skipping '{}': {}", record.class_path, e);
                    continue;
                }
            };

            let key = provider.name().to_lowercase();
            providers.insert(key, provider);
        }

        providers
    }

    /// Instantiate providers from raw JSON values, skipping invalid records.
    pub fn from_values(&self, values: &[Value]) -> ProviderMap {
        let records: Vec<ProviderRecord> = values
            .iter()
            .filter_map(|value| match serde_json::from_value(value.clone()) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::debug!("Skipping invalid record: {}", e);
                    None
                }
            })
            .collect();
        self.from_records(&records)
    }

    /// Instantiate providers from a declarative file.
    ///
    /// A missing file or any read or parse failure yields an empty map.
    pub fn from_file(&self, source: &ConfigFile) -> ProviderMap {
        let Some(path) = source.locate() else {
            tracing::debug!("No provider file found");
            return ProviderMap::new();
        };

        match read_records(&path) {
            Ok(records) => self.from_records(&records),
            Err(e) => {
                tracing::debug!("Ignoring provider file {}: {}", path.display(), e);
                ProviderMap::new()
            }
        }
    }

    /// Discover the provider types under `root` without instantiating them.
    pub fn discover_types(
        &self,
        root: &Path,
        options: &DiscoverOptions,
    ) -> Result<Vec<DiscoveredType>> {
        discover(self.registry, root, options)
    }

    /// Discover and instantiate the providers under `root`.
    ///
    /// Each instance records its file path relative to `root`, its type name
    /// and its unit. Types that fail to construct are skipped.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryNotFound` or `NotADirectory` if `root` is not an
    /// existing directory.
    pub fn from_dir(&self, root: &Path, options: &DiscoverOptions) -> Result<ProviderMap> {
        let mut providers = ProviderMap::new();

        for found in self.discover_types(root, options)? {
            let mut provider = match crate::provider::Provider::new(
                Rc::clone(&found.class),
                Rc::clone(&self.probe),
                None,
                &ConfigMap::new(),
            ) {
                Ok(provider) => provider,
                Err(e) => {
                    tracing::debug!("Skipping {}: {}", found.class.qualified_name(), e);
                    continue;
                }
            };

            provider.set_origin(
                found.path.to_string_lossy().into_owned(),
                found.class.type_name().to_string(),
                found.unit,
            );
            providers.insert(provider.name().to_lowercase(), provider);
        }

        Ok(providers)
    }

    /// Discover the bundled providers of library `lib_name`.
    ///
    /// Returns an empty map when the library is unknown or its providers
    /// directory does not exist; the latter is logged as a warning. `base_namespace` overrides the namespace
    /// registered with the library.
    pub fn from_library(&self, lib_name: &str, base_namespace: Option<&str>) -> Result<ProviderMap> {
        let Some(library) = self.registry.library(lib_name) else {
            tracing::debug!("Unknown library '{}'", lib_name);
            return Ok(ProviderMap::new());
        };
        if !library.providers_dir.is_dir() {
            tracing::warn!(
                "Providers directory for '{}' is missing: {}",
                lib_name,
                library.providers_dir.display()
            );
            return Ok(ProviderMap::new());
        }

        let namespace = base_namespace.unwrap_or(&library.namespace);
        let options = DiscoverOptions::default().with_base_namespace(namespace);
        self.from_dir(&library.providers_dir, &options)
    }
}

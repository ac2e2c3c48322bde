//! Load, filter, invoke.
//!
//! [`get_providers`] picks one source by precedence:
//!
//! 1. Declarative records (`records`)
//! 2. A declarative file (`file`)
//! 3. Directory discovery (`dir`)
//! 4. The bundled providers of library `lib_name`
//!
//! and then applies the query and attribute filters.

use std::path::PathBuf;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::Result;
use crate::filter::{filter_by_attributes, filter_by_query};
use crate::invoke::{invoke_all, invoke_first, FirstSuccess, ResultMap};
use crate::loader::{ConfigFile, DiscoverOptions, Loader, ProviderRecord};
use crate::provider::{ConfigMap, ProviderMap};
use crate::readiness::Probe;
use crate::registry::TypeRegistry;

/// Default library name.
pub const DEFAULT_LIB_NAME: &str = "providerkit";

/// Fields added to the query search when providers came from a directory.
const DIR_SEARCH_FIELDS: &[&str] = &["class_name", "class_path"];

/// Where to load providers from and how to narrow them.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub records: Option<Vec<ProviderRecord>>,
    pub file: Option<ConfigFile>,
    pub dir: Option<PathBuf>,
    pub base_namespace: Option<String>,
    pub lib_name: String,
    pub query: Option<String>,
    pub search_fields: Option<Vec<String>>,
    pub attributes: IndexMap<String, String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            records: None,
            file: None,
            dir: None,
            base_namespace: None,
            lib_name: DEFAULT_LIB_NAME.to_string(),
            query: None,
            search_fields: None,
            attributes: IndexMap::new(),
        }
    }
}

/// Load providers by source precedence, then filter them.
///
/// # Errors
///
/// Fails only when `dir` (or the library directory) is not a valid scan root.
pub fn get_providers(
    registry: &TypeRegistry,
    probe: Rc<Probe>,
    options: &LoadOptions,
) -> Result<ProviderMap> {
    let loader = Loader::new(registry, probe);

    let providers = if let Some(records) = &options.records {
        loader.from_records(records)
    } else if let Some(file) = &options.file {
        loader.from_file(file)
    } else if let Some(dir) = &options.dir {
        let discover = DiscoverOptions {
            base_namespace: options.base_namespace.clone(),
            ..Default::default()
        };
        loader.from_dir(dir, &discover)?
    } else {
        loader.from_library(&options.lib_name, options.base_namespace.as_deref())?
    };
    tracing::debug!("Loaded {} provider(s)", providers.len());

    let from_dir = options.records.is_none() && options.file.is_none() && options.dir.is_some();
    let extra_fields: &[&str] = if from_dir { DIR_SEARCH_FIELDS } else { &[] };
    let search_fields: Option<Vec<&str>> = options
        .search_fields
        .as_ref()
        .map(|fields| fields.iter().map(String::as_str).collect());

    let providers = filter_by_query(
        providers,
        options.query.as_deref(),
        search_fields.as_deref(),
        extra_fields,
    );
    Ok(filter_by_attributes(providers, &options.attributes))
}

fn resolve(
    registry: &TypeRegistry,
    probe: Rc<Probe>,
    providers: Option<ProviderMap>,
    options: &LoadOptions,
) -> Result<ProviderMap> {
    match providers {
        Some(providers) => Ok(providers),
        None => get_providers(registry, probe, options),
    }
}

/// Run `method` on every provider. Loads through [`get_providers`] when no
/// collection is given.
pub fn try_providers(
    registry: &TypeRegistry,
    probe: Rc<Probe>,
    method: &str,
    providers: Option<ProviderMap>,
    options: &LoadOptions,
    args: &ConfigMap,
) -> Result<ResultMap> {
    let providers = resolve(registry, probe, providers, options)?;
    invoke_all(method, &providers, args)
}

/// Run `method` until a provider succeeds. Loads through [`get_providers`]
/// when no collection is given.
pub fn try_providers_first(
    registry: &TypeRegistry,
    probe: Rc<Probe>,
    method: &str,
    providers: Option<ProviderMap>,
    options: &LoadOptions,
    args: &ConfigMap,
) -> Result<FirstSuccess> {
    let providers = resolve(registry, probe, providers, options)?;
    invoke_first(method, &providers, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::provider::ProviderClass;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(
            ProviderClass::new("MailProvider", "app::mail")
                .with_name("mail")
                .with_description("Sends mail")
                .with_services(["send"])
                .with_method("send", |_, _| Ok(json!("sent"))),
        );
        registry.register(
            ProviderClass::new("SmsProvider", "app::sms")
                .with_name("sms")
                .with_services(["send"]),
        );
        registry
    }

    fn probe() -> Rc<Probe> {
        Rc::new(Probe::empty())
    }

    #[test]
    fn records_take_precedence() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("p.json");
        fs::write(&file, r#"[{"class": "app::sms::SmsProvider"}]"#).unwrap();

        let options = LoadOptions {
            records: Some(vec![ProviderRecord::new("app::mail::MailProvider")]),
            file: Some(ConfigFile::Path(file.clone())),
            ..Default::default()
        };
        let providers = get_providers(&registry(), probe(), &options).unwrap();
        assert_eq!(providers.keys().collect::<Vec<_>>(), vec!["mail"]);

        let options = LoadOptions {
            file: Some(ConfigFile::Path(file)),
            ..Default::default()
        };
        let providers = get_providers(&registry(), probe(), &options).unwrap();
        assert_eq!(providers.keys().collect::<Vec<_>>(), vec!["sms"]);
    }

    #[test]
    fn missing_dir_is_fatal() {
        let options = LoadOptions {
            dir: Some(PathBuf::from("/definitely/not/here")),
            ..Default::default()
        };
        let err = get_providers(&registry(), probe(), &options).unwrap_err();
        assert!(matches!(err, ProviderError::DirectoryNotFound { .. }));
    }

    #[test]
    fn dir_queries_search_class_fields() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("sms.rs"), "").unwrap();
        fs::write(temp.path().join("mail.rs"), "").unwrap();

        let options = LoadOptions {
            dir: Some(temp.path().to_path_buf()),
            base_namespace: Some("app".into()),
            query: Some("SmsProv".into()),
            ..Default::default()
        };
        let providers = get_providers(&registry(), probe(), &options).unwrap();
        assert_eq!(providers.keys().collect::<Vec<_>>(), vec!["sms"]);
    }

    #[test]
    fn filters_apply_after_loading() {
        let mut attributes = IndexMap::new();
        attributes.insert("are_services_implemented".to_string(), "yes".to_string());
        let options = LoadOptions {
            records: Some(vec![
                ProviderRecord::new("app::mail::MailProvider"),
                ProviderRecord::new("app::sms::SmsProvider"),
            ]),
            attributes,
            ..Default::default()
        };
        let providers = get_providers(&registry(), probe(), &options).unwrap();
        assert_eq!(providers.keys().collect::<Vec<_>>(), vec!["mail"]);
    }

    #[test]
    fn try_uses_supplied_collection() {
        let options = LoadOptions {
            records: Some(vec![ProviderRecord::new("app::mail::MailProvider")]),
            ..Default::default()
        };
        let providers = get_providers(&registry(), probe(), &options).unwrap();
        let results = try_providers(
            &registry(),
            probe(),
            "send",
            Some(providers),
            &LoadOptions::default(),
            &ConfigMap::new(),
        )
        .unwrap();
        assert!(results["mail"].is_success());
    }

    #[test]
    fn try_first_loads_when_needed() {
        let options = LoadOptions {
            records: Some(vec![
                ProviderRecord::new("app::sms::SmsProvider"),
                ProviderRecord::new("app::mail::MailProvider"),
            ]),
            ..Default::default()
        };
        let first =
            try_providers_first(&registry(), probe(), "send", None, &options, &ConfigMap::new())
                .unwrap();
        assert_eq!(first.provider, "mail");
    }

    #[test]
    fn nothing_loaded_is_no_providers() {
        let options = LoadOptions {
            lib_name: "unknown".into(),
            ..Default::default()
        };
        let err = try_providers(&registry(), probe(), "send", None, &options, &ConfigMap::new())
            .unwrap_err();
        assert!(matches!(err, ProviderError::NoProviders));
    }
}

//! The type registry.
//!
//! Maps qualified identifiers (`unit::TypeName`) to registered types, keeps
//! the member list of every unit, records library roots used for
//! package-default discovery, and remembers the source file of a unit when
//! it is known.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use indexmap::IndexMap;

use super::entry::{Library, TypeEntry};
use crate::provider::{ProviderClass, PATH_SEPARATOR};

/// Registry of known types, grouped by unit.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeEntry>,
    units: IndexMap<String, Vec<String>>,
    libraries: IndexMap<String, Library>,
    sources: IndexMap<String, PathBuf>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the provider contract and the bundled
    /// providers, and the `providerkit` library pointing at them.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(ProviderClass::contract());
        crate::providers::register(&mut registry);
        registry.register_library(
            crate::providers::LIBRARY_NAME,
            Library::new(crate::providers::providers_dir(), crate::providers::NAMESPACE),
        );
        registry
    }

    /// Register a provider class in its own unit. Replaces any type with
    /// the same qualified name.
    pub fn register(&mut self, class: ProviderClass) -> Rc<ProviderClass> {
        let class = Rc::new(class);
        self.insert(TypeEntry::Provider(Rc::clone(&class)));
        class
    }

    /// Register a non-provider type.
    pub fn register_other(&mut self, type_name: impl Into<String>, module: impl Into<String>) {
        self.insert(TypeEntry::Other {
            type_name: type_name.into(),
            module: module.into(),
        });
    }

    fn insert(&mut self, entry: TypeEntry) {
        let qualified = entry.qualified_name();
        self.add_member(entry.module().to_string(), qualified.clone());
        self.types.insert(qualified, entry);
    }

    fn add_member(&mut self, unit: String, qualified: String) {
        let members = self.units.entry(unit).or_default();
        if !members.contains(&qualified) {
            members.push(qualified);
        }
    }

    /// Make a registered type visible in another unit, as a `use` would.
    ///
    /// Imported members resolve through the unit but are not defined in it.
    /// Returns `false` if `qualified` is not registered.
    pub fn import(&mut self, unit: impl Into<String>, qualified: &str) -> bool {
        if !self.types.contains_key(qualified) {
            return false;
        }
        self.add_member(unit.into(), qualified.to_string());
        true
    }

    /// Register a library. Every unit already registered under the library
    /// namespace gets its source file recorded inside `providers_dir`.
    pub fn register_library(&mut self, name: impl Into<String>, library: Library) {
        let prefix = format!("{}{}", library.namespace, PATH_SEPARATOR);
        let sources: Vec<(String, PathBuf)> = self
            .units
            .keys()
            .filter_map(|unit| {
                let relative = unit.strip_prefix(&prefix)?;
                let mut path = library.providers_dir.clone();
                path.extend(relative.split(PATH_SEPARATOR));
                path.set_extension("rs");
                Some((unit.clone(), path))
            })
            .collect();
        for (unit, path) in sources {
            self.set_source(unit, path);
        }
        self.libraries.insert(name.into(), library);
    }

    /// Record the source file a unit is compiled from.
    pub fn set_source(&mut self, unit: impl Into<String>, path: impl Into<PathBuf>) {
        self.sources.insert(unit.into(), path.into());
    }

    /// Source file of a unit, if recorded.
    pub fn source(&self, unit: &str) -> Option<&Path> {
        self.sources.get(unit).map(PathBuf::as_path)
    }

    pub fn library(&self, name: &str) -> Option<&Library> {
        self.libraries.get(name)
    }

    /// Bundled providers directory of a library, if registered.
    pub fn library_dir(&self, name: &str) -> Option<&PathBuf> {
        self.libraries.get(name).map(|lib| &lib.providers_dir)
    }

    /// Look up a type by its qualified name.
    pub fn get(&self, qualified: &str) -> Option<&TypeEntry> {
        self.types.get(qualified)
    }

    /// Resolve `unit::TypeName` through the unit's members.
    ///
    /// The path is split on its last separator. `None` if the unit is not
    /// registered or has no member of that name.
    pub fn resolve(&self, path: &str) -> Option<&TypeEntry> {
        let (unit, type_name) = split_path(path)?;
        self.units
            .get(unit)?
            .iter()
            .filter_map(|qualified| self.types.get(qualified))
            .find(|entry| entry.type_name() == type_name)
    }

    pub fn has_unit(&self, unit: &str) -> bool {
        self.units.contains_key(unit)
    }

    /// Every member of a unit, defined or imported, in registration order.
    pub fn members<'a>(&'a self, unit: &str) -> impl Iterator<Item = &'a TypeEntry> + 'a {
        self.units
            .get(unit)
            .into_iter()
            .flatten()
            .filter_map(move |qualified| self.types.get(qualified))
    }

    /// Units equal to `relative` or ending in `::relative`.
    pub fn units_matching<'a>(&'a self, relative: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.units.keys().map(String::as_str).filter(move |unit| {
            *unit == relative
                || unit
                    .strip_suffix(relative)
                    .is_some_and(|head| head.ends_with(PATH_SEPARATOR))
        })
    }

    /// Iterate over all registered types.
    pub fn iter(&self) -> impl Iterator<Item = &TypeEntry> {
        self.types.values()
    }

    /// Get the number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Split `a::b::Type` into (`a::b`, `Type`).
pub fn split_path(path: &str) -> Option<(&str, &str)> {
    let (unit, type_name) = path.rsplit_once(PATH_SEPARATOR)?;
    if unit.is_empty() || type_name.is_empty() {
        return None;
    }
    Some((unit, type_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(ProviderClass::contract());
        registry.register(ProviderClass::new("MailProvider", "app::mail").with_name("mail"));
        registry.register_other("SmtpClient", "app::mail");
        registry
    }

    #[test]
    fn new_is_empty() {
        let registry = TypeRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn split_on_last_separator() {
        assert_eq!(split_path("a::b::C"), Some(("a::b", "C")));
        assert_eq!(split_path("C"), None);
        assert_eq!(split_path("::C"), None);
        assert_eq!(split_path("a::"), None);
    }

    #[test]
    fn resolve_through_unit() {
        let registry = registry();
        let entry = registry.resolve("app::mail::MailProvider").unwrap();
        assert!(entry.as_provider().is_some());
        let other = registry.resolve("app::mail::SmtpClient").unwrap();
        assert!(other.as_provider().is_none());
        assert!(registry.resolve("app::mail::Missing").is_none());
        assert!(registry.resolve("app::nowhere::MailProvider").is_none());
    }

    #[test]
    fn imported_members_resolve_but_keep_their_module() {
        let mut registry = registry();
        assert!(registry.import("app::notify", "app::mail::MailProvider"));
        assert!(!registry.import("app::notify", "app::mail::Ghost"));

        let entry = registry.resolve("app::notify::MailProvider").unwrap();
        assert_eq!(entry.module(), "app::mail");
        assert_eq!(registry.members("app::notify").count(), 1);
    }

    #[test]
    fn re_registering_replaces() {
        let mut registry = registry();
        registry.register(ProviderClass::new("MailProvider", "app::mail").with_name("mail2"));
        let entry = registry.resolve("app::mail::MailProvider").unwrap();
        assert_eq!(entry.as_provider().unwrap().name(), "mail2");
        assert_eq!(registry.members("app::mail").count(), 2);
    }

    #[test]
    fn units_match_by_suffix() {
        let registry = registry();
        let found: Vec<_> = registry.units_matching("mail").collect();
        assert_eq!(found, vec!["app::mail"]);
        assert_eq!(registry.units_matching("ail").count(), 0);
        assert_eq!(registry.units_matching("app::mail").count(), 1);
    }

    #[test]
    fn library_records_unit_sources() {
        let mut registry = registry();
        registry.register(ProviderClass::new("SmsProvider", "app::sms::twilio"));
        registry.register(ProviderClass::new("Other", "elsewhere::mail"));
        registry.register_library("app", Library::new("/srv/app", "app"));

        assert_eq!(registry.source("app::mail"), Some(Path::new("/srv/app/mail.rs")));
        assert_eq!(
            registry.source("app::sms::twilio"),
            Some(Path::new("/srv/app/sms/twilio.rs"))
        );
        assert_eq!(registry.source("elsewhere::mail"), None);
    }

    #[test]
    fn builtins_include_the_library() {
        let registry = TypeRegistry::with_builtins();
        let library = registry.library("providerkit").unwrap();
        assert_eq!(library.namespace, "providerkit::providers");
        assert!(library.providers_dir.ends_with("providers"));
        assert!(registry
            .source("providerkit::providers::asia::japan")
            .is_some_and(Path::is_file));
        assert!(registry
            .resolve("providerkit::providers::asia::japan::JapanAlphabetProvider")
            .is_some());
    }
}

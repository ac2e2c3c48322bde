//! Provider class definitions.
//!
//! A [`ProviderClass`] is the static description of a provider type: its
//! identification defaults, declared requirements, and attribute table
//! (plain values, nested type references, and service methods). It plays
//! the part a class plays in a dynamic language. Instances are built from
//! it with [`ProviderClass::instantiate`].
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use providerkit::provider::{ConfigMap, ProviderClass};
//! use providerkit::readiness::Probe;
//! use serde_json::json;
//!
//! let class = ProviderClass::new("EchoProvider", module_path!())
//!     .with_name("echo")
//!     .with_services(["echo"])
//!     .with_method("echo", |_provider, args| Ok(json!(args)));
//!
//! let provider = class
//!     .instantiate(Rc::new(Probe::empty()), None, &ConfigMap::new())
//!     .unwrap();
//! assert_eq!(provider.name(), "echo");
//! assert_eq!(provider.display_name(), "echo");
//! ```

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Value;

use super::instance::Provider;
use super::urls::Urls;
use super::ConfigMap;

/// A service method: receives the provider and keyword arguments.
pub type ServiceFn = Rc<dyn Fn(&Provider, &ConfigMap) -> anyhow::Result<Value>>;

/// Construction hook run after the generic fields are set.
pub type InitFn = Rc<dyn Fn(&mut Provider, &ConfigMap) -> anyhow::Result<()>>;

/// Separator between path segments of a qualified type identifier.
pub const PATH_SEPARATOR: &str = "::";

/// Type name of the base provider contract.
pub const CONTRACT_TYPE_NAME: &str = "ProviderBase";

/// A named member of a provider class or instance.
#[derive(Clone)]
pub enum Attribute {
    /// A plain value.
    Value(Value),
    /// A callable service method.
    Method(ServiceFn),
    /// A reference to another type. Not callable as a service.
    Type(String),
}

impl Attribute {
    /// Whether this attribute can be invoked as a service.
    pub fn is_method(&self) -> bool {
        matches!(self, Attribute::Method(_))
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Attribute::Method(_) => f.write_str("Method(..)"),
            Attribute::Type(path) => f.debug_tuple("Type").field(path).finish(),
        }
    }
}

impl From<Value> for Attribute {
    fn from(value: Value) -> Self {
        Attribute::Value(value)
    }
}

/// Static description of a provider type.
#[derive(Clone)]
pub struct ProviderClass {
    pub(crate) type_name: String,
    pub(crate) module: String,
    pub(crate) name: String,
    pub(crate) display_name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) required_packages: Vec<String>,
    pub(crate) config_keys: Vec<String>,
    pub(crate) config_prefix: String,
    pub(crate) config_defaults: ConfigMap,
    pub(crate) services: Vec<String>,
    pub(crate) urls: Urls,
    pub(crate) attributes: IndexMap<String, Attribute>,
    pub(crate) init: Option<InitFn>,
}

impl ProviderClass {
    /// Start a class definition for `type_name` defined in `module`.
    ///
    /// `module` is normally `module_path!()` at the definition site.
    pub fn new(type_name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            module: module.into(),
            name: String::new(),
            display_name: None,
            description: None,
            required_packages: Vec::new(),
            config_keys: Vec::new(),
            config_prefix: String::new(),
            config_defaults: ConfigMap::new(),
            services: Vec::new(),
            urls: Urls::default(),
            attributes: IndexMap::new(),
            init: None,
        }
    }

    /// The base provider contract. It has no name, so it cannot be built.
    pub fn contract() -> Self {
        Self::new(CONTRACT_TYPE_NAME, "providerkit::provider")
    }

    /// Derive a new type from this one, keeping everything it declares.
    pub fn derive(&self, type_name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            module: module.into(),
            ..self.clone()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_required_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_packages = packages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_config_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Prefix for the most specific environment fallback
    /// (`{PREFIX}_{NAME}_{KEY}`).
    pub fn with_config_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config_prefix = prefix.into();
        self
    }

    /// Register a default value for a config key.
    pub fn with_config_default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config_defaults.insert(key.into(), value.into());
        self
    }

    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_urls(mut self, urls: Urls) -> Self {
        self.urls = urls;
        self
    }

    /// Add a plain value attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .insert(name.into(), Attribute::Value(value.into()));
        self
    }

    /// Add a nested type reference.
    pub fn with_type_attribute(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), Attribute::Type(path.into()));
        self
    }

    /// Add a method. Methods listed in `services` are what readiness checks look for.
    pub fn with_method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&Provider, &ConfigMap) -> anyhow::Result<Value> + 'static,
    {
        self.attributes
            .insert(name.into(), Attribute::Method(Rc::new(method)));
        self
    }

    /// Run `init` at the end of construction. An error fails construction.
    pub fn with_init<F>(mut self, init: F) -> Self
    where
        F: Fn(&mut Provider, &ConfigMap) -> anyhow::Result<()> + 'static,
    {
        self.init = Some(Rc::new(init));
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Fully qualified identifier, `module::TypeName`.
    pub fn qualified_name(&self) -> String {
        format!("{}{}{}", self.module, PATH_SEPARATOR, self.type_name)
    }

    /// Declared provider name (may be empty for abstract classes).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required_packages(&self) -> &[String] {
        &self.required_packages
    }

    pub fn config_keys(&self) -> &[String] {
        &self.config_keys
    }

    pub fn services(&self) -> &[String] {
        &self.services
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Whether this is the base contract type.
    pub fn is_contract(&self) -> bool {
        self.type_name == CONTRACT_TYPE_NAME && self.module == "providerkit::provider"
    }
}

impl fmt::Debug for ProviderClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderClass")
            .field("type_name", &self.type_name)
            .field("module", &self.module)
            .field("name", &self.name)
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_sets_declared_requirements() {
        let class = ProviderClass::new("MailProvider", "app::mail")
            .with_name("mail")
            .with_required_packages(["smtp-client"])
            .with_config_keys(["HOST", "PORT"])
            .with_services(["send"]);

        assert_eq!(class.name(), "mail");
        assert_eq!(class.required_packages(), ["smtp-client"]);
        assert_eq!(class.config_keys(), ["HOST", "PORT"]);
        assert_eq!(class.services(), ["send"]);
        assert_eq!(class.qualified_name(), "app::mail::MailProvider");
    }

    #[test]
    fn derive_keeps_parent_members() {
        let base = ProviderClass::new("BaseProvider", "app::base")
            .with_services(["send"])
            .with_method("send", |_, _| Ok(json!("sent")));
        let child = base.derive("SmsProvider", "app::sms").with_name("sms");

        assert_eq!(child.type_name(), "SmsProvider");
        assert_eq!(child.module(), "app::sms");
        assert!(child.attribute("send").is_some_and(Attribute::is_method));
        assert!(base.name().is_empty());
    }

    #[test]
    fn contract_is_recognised() {
        assert!(ProviderClass::contract().is_contract());
        assert!(!ProviderClass::new("ProviderBase", "elsewhere").is_contract());
    }

    #[test]
    fn type_attributes_are_not_methods() {
        let class = ProviderClass::new("P", "m").with_type_attribute("Client", "m::Client");
        let attr = class.attribute("Client").unwrap();
        assert!(!attr.is_method());
        assert_eq!(format!("{:?}", attr), "Type(\"m::Client\")");
    }
}

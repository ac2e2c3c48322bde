//! Provider instances.
//!
//! A [`Provider`] is one configured instance of a [`ProviderClass`]. It owns
//! its identification, its filtered configuration, any per-instance
//! attributes passed as keyword arguments, and the three readiness caches.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Value;

use super::class::{Attribute, ProviderClass};
use super::urls::{HasUrls, Urls};
use super::ConfigMap;
use crate::error::{ProviderError, Result};
use crate::readiness::{ConfigReadiness, PackageReadiness, Probe, ReadinessMap, ServiceReadiness};

/// Keyword arguments consumed by construction itself.
const RESERVED_KWARGS: &[&str] = &[
    "name",
    "display_name",
    "description",
    "documentation_url",
    "site_url",
    "status_url",
    "path",
    "class_name",
    "class_path",
    "provider_can_be_used",
    "config",
];

/// Attribute that marks a provider as unusable for invocation.
pub const USABLE_ATTRIBUTE: &str = "provider_can_be_used";

/// A configured provider instance.
pub struct Provider {
    class: Rc<ProviderClass>,
    probe: Rc<Probe>,
    name: String,
    display_name: String,
    description: Option<String>,
    urls: Urls,
    path: Option<String>,
    class_name: Option<String>,
    class_path: Option<String>,
    usable: bool,
    attributes: IndexMap<String, Attribute>,
    config: ConfigMap,
    pub(crate) packages_cache: OnceCell<ReadinessMap>,
    pub(crate) config_cache: OnceCell<ReadinessMap>,
    pub(crate) services_cache: OnceCell<ReadinessMap>,
}

impl ProviderClass {
    /// Build an instance of this class.
    ///
    /// See [`Provider::new`].
    pub fn instantiate(
        &self,
        probe: Rc<Probe>,
        config: Option<&ConfigMap>,
        kwargs: &ConfigMap,
    ) -> Result<Provider> {
        Provider::new(Rc::new(self.clone()), probe, config, kwargs)
    }
}

impl Provider {
    /// Construct a provider.
    ///
    /// `kwargs` may override `name`, `display_name`, `description`, the URLs,
    /// the path metadata and `provider_can_be_used`; any other keyword
    /// becomes an instance attribute. A `config` keyword is used as base
    /// configuration that `config` overrides key by key. The result is
    /// filtered to the class's declared config keys.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if `name` or `display_name` ends up empty,
    /// `InvalidField` for a keyword of the wrong type (including a `config`
    /// keyword that is not an object), and `Other` if the
    /// class's init hook fails.
    pub fn new(
        class: Rc<ProviderClass>,
        probe: Rc<Probe>,
        config: Option<&ConfigMap>,
        kwargs: &ConfigMap,
    ) -> Result<Self> {
        let name = match string_kwarg(kwargs, "name")? {
            Some(name) => name.unwrap_or_default(),
            None => class.name.clone(),
        };
        if name.is_empty() {
            return Err(ProviderError::MissingField {
                field: "name".to_string(),
            });
        }

        let display_name = match string_kwarg(kwargs, "display_name")? {
            Some(display_name) => display_name.unwrap_or_default(),
            None => class.display_name.clone().unwrap_or_else(|| name.clone()),
        };
        if display_name.is_empty() {
            return Err(ProviderError::MissingField {
                field: "display_name".to_string(),
            });
        }

        let description = optional_kwarg(kwargs, "description", class.description.clone())?;
        let urls = Urls {
            documentation: optional_kwarg(
                kwargs,
                "documentation_url",
                class.urls.documentation.clone(),
            )?,
            site: optional_kwarg(kwargs, "site_url", class.urls.site.clone())?,
            status: optional_kwarg(kwargs, "status_url", class.urls.status.clone())?,
        };

        let usable = match kwargs.get(USABLE_ATTRIBUTE) {
            Some(Value::Bool(flag)) => *flag,
            Some(other) => {
                return Err(ProviderError::InvalidField {
                    field: USABLE_ATTRIBUTE.to_string(),
                    message: format!("expected a boolean, got {}", other),
                })
            }
            None => !matches!(
                class.attributes.get(USABLE_ATTRIBUTE),
                Some(Attribute::Value(Value::Bool(false)))
            ),
        };

        let attributes = kwargs
            .iter()
            .filter(|(key, _)| !RESERVED_KWARGS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), Attribute::Value(value.clone())))
            .collect();

        let mut provider = Self {
            probe,
            name,
            display_name,
            description,
            urls,
            path: optional_kwarg(kwargs, "path", None)?,
            class_name: optional_kwarg(kwargs, "class_name", None)?,
            class_path: optional_kwarg(kwargs, "class_path", None)?,
            usable,
            attributes,
            config: ConfigMap::new(),
            packages_cache: OnceCell::new(),
            config_cache: OnceCell::new(),
            services_cache: OnceCell::new(),
            class,
        };

        let merged = match (kwargs.get("config"), config) {
            (None, config) => config.cloned(),
            (Some(Value::Object(base)), None) => Some(base.clone()),
            (Some(Value::Object(base)), Some(config)) => {
                tracing::debug!("Merging keyword config under explicit config for '{}'", provider.name);
                let mut merged = base.clone();
                merged.extend(config.clone());
                Some(merged)
            }
            (Some(other), _) => {
                return Err(ProviderError::InvalidField {
                    field: "config".to_string(),
                    message: format!("expected an object, got {}", other),
                })
            }
        };
        if let Some(config) = merged {
            provider.config = provider.filter_config(&config);
        }

        if let Some(init) = provider.class.init.clone() {
            init(&mut provider, kwargs)?;
        }

        Ok(provider)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Source file of a discovered provider, relative to the scan root.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn class_path(&self) -> Option<&str> {
        self.class_path.as_deref()
    }

    /// Record where a discovered provider came from.
    pub(crate) fn set_origin(&mut self, path: String, class_name: String, class_path: String) {
        self.path = Some(path);
        self.class_name = Some(class_name);
        self.class_path = Some(class_path);
    }

    /// Whether the invoker may use this provider.
    pub fn is_usable(&self) -> bool {
        self.usable
    }

    pub fn set_usable(&mut self, usable: bool) {
        self.usable = usable;
    }

    pub fn class(&self) -> &ProviderClass {
        &self.class
    }

    pub fn probe(&self) -> &Probe {
        &self.probe
    }

    /// The instance configuration (already filtered to declared keys).
    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    /// Keep only the declared config keys, or everything if none are declared.
    pub fn filter_config(&self, config: &ConfigMap) -> ConfigMap {
        if self.class.config_keys.is_empty() {
            return config.clone();
        }
        self.class
            .config_keys
            .iter()
            .filter_map(|key| config.get(key).map(|value| (key.clone(), value.clone())))
            .collect()
    }

    /// Merge (or with `replace`, swap in) new configuration.
    ///
    /// Always invalidates the config readiness cache.
    pub fn configure(&mut self, config: &ConfigMap, replace: bool) -> &mut Self {
        let filtered = self.filter_config(config);
        if replace {
            self.config = filtered;
        } else {
            self.config.extend(filtered);
        }
        self.clear_config_cache();
        self
    }

    /// Set an instance attribute, shadowing the class attribute of that name.
    pub fn set_attribute(&mut self, name: impl Into<String>, attribute: Attribute) {
        self.attributes.insert(name.into(), attribute);
    }

    /// Look up an attribute on the instance, then on the class.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .get(name)
            .or_else(|| self.class.attributes.get(name))
    }

    /// Call a method attribute. Returns `None` if there is no such method.
    pub fn call(&self, method: &str, args: &ConfigMap) -> Option<anyhow::Result<Value>> {
        match self.attribute(method)? {
            Attribute::Method(f) => Some(f(self, args)),
            _ => None,
        }
    }

    /// Resolve a named attribute to a value.
    ///
    /// Identification, URL and path fields, readiness predicates and
    /// declared requirement lists are built in; anything else comes from
    /// the attribute table. Methods are called with no arguments when
    /// `invoke` is set and are otherwise unresolvable; a method that fails
    /// resolves to nothing. `null` values count as absent.
    pub fn resolve_attribute(&self, name: &str, invoke: bool) -> Option<Value> {
        let value = match name {
            "name" => Value::from(self.name.as_str()),
            "display_name" => Value::from(self.display_name.as_str()),
            "description" => Value::from(self.description.clone()),
            "documentation_url" => Value::from(self.urls.documentation.clone()),
            "site_url" => Value::from(self.urls.site.clone()),
            "status_url" => Value::from(self.urls.status.clone()),
            "path" => Value::from(self.path.clone()),
            "class_name" => Value::from(self.class_name.clone()),
            "class_path" => Value::from(self.class_path.clone()),
            USABLE_ATTRIBUTE => Value::Bool(self.usable),
            "required_packages" => Value::from(self.class.required_packages.clone()),
            "config_keys" => Value::from(self.class.config_keys.clone()),
            "services" => Value::from(self.class.services.clone()),
            "is_config_ready" if invoke => Value::Bool(self.is_config_ready()),
            "are_packages_installed" if invoke => Value::Bool(self.are_packages_installed()),
            "are_services_implemented" if invoke => Value::Bool(self.are_services_implemented()),
            _ => match self.attribute(name)? {
                Attribute::Value(value) => value.clone(),
                Attribute::Type(path) => Value::from(path.as_str()),
                Attribute::Method(f) if invoke => match f(self, &ConfigMap::new()) {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::debug!("Attribute '{}' of '{}' failed: {}", name, self.name, e);
                        return None;
                    }
                },
                Attribute::Method(_) => return None,
            },
        };
        (!value.is_null()).then_some(value)
    }

    /// Provider name as used in environment variable names.
    pub fn env_name(&self) -> String {
        self.name.to_uppercase().replace('-', "_")
    }
}

impl HasUrls for Provider {
    fn documentation_url(&self) -> Option<&str> {
        self.urls.documentation.as_deref()
    }

    fn site_url(&self) -> Option<&str> {
        self.urls.site.as_deref()
    }

    fn status_url(&self) -> Option<&str> {
        self.urls.status.as_deref()
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("class", &self.class.qualified_name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// `Some(Some(s))` for a string, `Some(None)` for null, `None` when absent.
fn string_kwarg(kwargs: &ConfigMap, key: &str) -> Result<Option<Option<String>>> {
    match kwargs.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(s)) => Ok(Some(Some(s.clone()))),
        Some(other) => Err(ProviderError::InvalidField {
            field: key.to_string(),
            message: format!("expected a string, got {}", other),
        }),
    }
}

fn optional_kwarg(kwargs: &ConfigMap, key: &str, fallback: Option<String>) -> Result<Option<String>> {
    Ok(match string_kwarg(kwargs, key)? {
        Some(value) => value,
        None => fallback,
    })
}

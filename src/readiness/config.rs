//! Configuration readiness.
//!
//! A config key counts as present when it is in the instance config, has a
//! registered default, or can be read from the environment. Environment
//! names are tried most specific first:
//!
//! 1. `{PREFIX}_{NAME}_{KEY}` (only when the class sets a prefix)
//! 2. `{NAME}_{KEY}`
//! 3. `{KEY}`
//!
//! `NAME` is the provider name upper-cased with `-` replaced by `_`, and
//! `KEY` is the key upper-cased.

use serde_json::Value;

use super::ReadinessMap;
use crate::provider::{ConfigMap, Provider};

/// Checks that a provider's configuration keys are satisfiable.
pub trait ConfigReadiness {
    /// Keys the provider declares, in declaration order.
    fn config_keys(&self) -> &[String];

    /// Whether one key is present in the config, defaults or environment.
    fn is_config_key_set(&self, key: &str) -> bool;

    /// Status of every declared key. Computed once, then cached.
    fn check_config(&self) -> &ReadinessMap;

    /// Status of every declared key against `config` instead of the
    /// instance config. Never cached.
    fn check_config_with(&self, config: &ConfigMap) -> ReadinessMap;

    fn clear_config_cache(&mut self);

    /// Resolve a key: instance config, then environment, then default.
    fn config_value(&self, key: &str) -> Option<Value>;

    fn is_config_ready(&self) -> bool {
        self.check_config().values().all(|ready| *ready)
    }

    /// Declared keys that are not present, in declaration order.
    fn missing_config_keys(&self) -> Vec<String> {
        self.check_config()
            .iter()
            .filter(|(_, ready)| !**ready)
            .map(|(key, _)| key.clone())
            .collect()
    }
}

impl Provider {
    /// Environment variable names consulted for `key`, most specific first.
    pub fn env_keys(&self, key: &str) -> Vec<String> {
        let name = self.env_name();
        let key = key.to_uppercase();
        let prefix = &self.class().config_prefix;

        let mut keys = Vec::with_capacity(3);
        if !prefix.is_empty() {
            keys.push(format!("{}_{}_{}", prefix, name, key));
        }
        keys.push(format!("{}_{}", name, key));
        keys.push(key);
        keys
    }

    fn env_value(&self, key: &str) -> Option<String> {
        self.env_keys(key)
            .iter()
            .find_map(|candidate| self.probe().var(candidate))
    }

    fn key_present_in(&self, config: &ConfigMap, key: &str) -> bool {
        config.contains_key(key)
            || self.class().config_defaults.contains_key(key)
            || self.env_value(key).is_some()
    }

    fn config_status(&self, config: &ConfigMap) -> ReadinessMap {
        self.config_keys()
            .iter()
            .map(|key| (key.clone(), self.key_present_in(config, key)))
            .collect()
    }
}

impl ConfigReadiness for Provider {
    fn config_keys(&self) -> &[String] {
        self.class().config_keys()
    }

    fn is_config_key_set(&self, key: &str) -> bool {
        self.key_present_in(self.config(), key)
    }

    fn check_config(&self) -> &ReadinessMap {
        self.config_cache.get_or_init(|| {
            tracing::debug!("Checking config for provider '{}'", self.name());
            self.config_status(self.config())
        })
    }

    fn check_config_with(&self, config: &ConfigMap) -> ReadinessMap {
        self.config_status(config)
    }

    fn clear_config_cache(&mut self) {
        self.config_cache.take();
    }

    fn config_value(&self, key: &str) -> Option<Value> {
        match self.config().get(key) {
            Some(value) if !value.is_null() => Some(value.clone()),
            _ => self
                .env_value(key)
                .map(Value::String)
                .or_else(|| self.class().config_defaults.get(key).cloned()),
        }
    }
}

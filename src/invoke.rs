//! Invoking a method across providers.
//!
//! Two strategies share the same readiness gate (packages, then config, then
//! services):
//!
//! - [`invoke_all`] calls every ready provider and reports each outcome
//! - [`invoke_first`] stops at the first provider that succeeds
//!
//! Providers marked unusable are skipped by both. Providers are visited in
//! collection order.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::provider::{ConfigMap, Provider, ProviderMap};
use crate::readiness::{ConfigReadiness, PackageReadiness, ServiceReadiness};

/// Names listed in a method-not-found error before switching to a count.
const MAX_LISTED_PROVIDERS: usize = 5;

/// What happened when one provider was asked to run a method.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// The method returned a value.
    Success { result: Value, display_name: String },
    /// The method ran and failed.
    Failed { error: String, display_name: String },
    /// The provider was not ready; the method was not called.
    NotReady {
        errors: Vec<String>,
        display_name: String,
    },
}

impl Outcome {
    pub fn display_name(&self) -> &str {
        match self {
            Outcome::Success { display_name, .. }
            | Outcome::Failed { display_name, .. }
            | Outcome::NotReady { display_name, .. } => display_name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

/// Outcomes keyed by provider key, in visiting order.
pub type ResultMap = IndexMap<String, Outcome>;

/// The provider that answered in try-first mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FirstSuccess {
    pub provider: String,
    pub display_name: String,
    pub result: Value,
}

impl FirstSuccess {
    /// As a single-entry result map, for formatting.
    pub fn into_results(self) -> ResultMap {
        let mut results = ResultMap::new();
        results.insert(
            self.provider,
            Outcome::Success {
                result: self.result,
                display_name: self.display_name,
            },
        );
        results
    }
}

fn package_errors(provider: &Provider, errors: &mut Vec<String>) {
    if !provider.are_packages_installed() {
        errors.push(format!(
            "Packages missing: {}",
            provider.missing_packages().join(", ")
        ));
    }
}

fn config_errors(provider: &Provider, errors: &mut Vec<String>) {
    if !provider.is_config_ready() {
        errors.push(format!(
            "Config missing: {}",
            provider.missing_config_keys().join(", ")
        ));
    }
}

/// `(implemented, total)` over the declared services.
fn service_counts(provider: &Provider) -> (usize, usize) {
    let status = provider.check_services();
    let implemented = status.values().filter(|ready| **ready).count();
    (implemented, status.len())
}

fn method_not_found(method: &str, checked: &[String]) -> ProviderError {
    let detail = if checked.len() <= MAX_LISTED_PROVIDERS {
        format!("Checked providers: {}", checked.join(", "))
    } else {
        format!(
            "Checked {} providers (none implement '{}')",
            checked.len(),
            method
        )
    };
    ProviderError::MethodNotFound {
        method: method.to_string(),
        detail,
    }
}

fn call(provider: &Provider, method: &str, args: &ConfigMap) -> Option<Outcome> {
    let display_name = provider.display_name().to_string();
    Some(match provider.call(method, args)? {
        Ok(result) => Outcome::Success {
            result,
            display_name,
        },
        Err(e) => Outcome::Failed {
            error: e.to_string(),
            display_name,
        },
    })
}

/// Run `method` on every usable provider.
///
/// A provider that is not ready gets a [`Outcome::NotReady`] entry listing
/// every reason. If nothing succeeded and every failure was only the method
/// being absent, a single [`ProviderError::MethodNotFound`] is returned
/// instead of the map.
///
/// # Errors
///
/// `NoProviders` for an empty collection, `MethodNotFound` as above.
pub fn invoke_all(method: &str, providers: &ProviderMap, args: &ConfigMap) -> Result<ResultMap> {
    if providers.is_empty() {
        return Err(ProviderError::NoProviders);
    }

    let mut results = ResultMap::new();
    let mut without_method = Vec::new();

    for (key, provider) in providers {
        if !provider.is_usable() {
            tracing::debug!("Skipping unusable provider '{}'", key);
            continue;
        }

        let mut errors = Vec::new();
        package_errors(provider, &mut errors);
        config_errors(provider, &mut errors);

        if !provider.is_service_implemented(method) {
            let (implemented, total) = service_counts(provider);
            if total == 0 {
                errors.push(format!("Service missing: {}", method));
            } else {
                errors.push(format!(
                    "Service missing: {} ({}/{} services implemented)",
                    method, implemented, total
                ));
            }
            if errors.len() == 1 {
                without_method.push(key.clone());
            }
        }

        if !errors.is_empty() {
            results.insert(
                key.clone(),
                Outcome::NotReady {
                    errors,
                    display_name: provider.display_name().to_string(),
                },
            );
            continue;
        }

        match call(provider, method, args) {
            Some(outcome) => {
                results.insert(key.clone(), outcome);
            }
            None => without_method.push(key.clone()),
        }
    }

    let succeeded = results.values().any(Outcome::is_success);
    let failed = results.values().filter(|o| !o.is_success()).count();
    if !succeeded && !without_method.is_empty() && without_method.len() == failed {
        return Err(method_not_found(method, &without_method));
    }

    Ok(results)
}

/// Run `method` on usable providers until one succeeds.
///
/// Readiness requires every declared service, not only `method`.
///
/// # Errors
///
/// `NoProviders` for an empty collection. If nothing succeeds:
/// `MethodNotFound` when every ready provider lacked the method and no
/// other outcome was recorded, otherwise `AllProvidersFailed` carrying
/// each provider's outcome.
pub fn invoke_first(
    method: &str,
    providers: &ProviderMap,
    args: &ConfigMap,
) -> Result<FirstSuccess> {
    if providers.is_empty() {
        return Err(ProviderError::NoProviders);
    }

    let mut results = ResultMap::new();
    let mut without_method = Vec::new();

    for (key, provider) in providers {
        if !provider.is_usable() {
            tracing::debug!("Skipping unusable provider '{}'", key);
            continue;
        }

        let mut errors = Vec::new();
        package_errors(provider, &mut errors);
        config_errors(provider, &mut errors);

        if !provider.are_services_implemented() {
            let (implemented, total) = service_counts(provider);
            errors.push(format!(
                "Services missing: {} ({}/{} services implemented)",
                provider.missing_services().join(", "),
                implemented,
                total
            ));
        }

        if !errors.is_empty() {
            results.insert(
                key.clone(),
                Outcome::NotReady {
                    errors,
                    display_name: provider.display_name().to_string(),
                },
            );
            continue;
        }

        match call(provider, method, args) {
            Some(Outcome::Success {
                result,
                display_name,
            }) => {
                tracing::debug!("'{}' answered '{}'", key, method);
                return Ok(FirstSuccess {
                    provider: key.clone(),
                    display_name,
                    result,
                });
            }
            Some(outcome) => {
                results.insert(key.clone(), outcome);
            }
            None => without_method.push(key.clone()),
        }
    }

    if results.is_empty() && !without_method.is_empty() {
        return Err(method_not_found(method, &without_method));
    }

    Err(ProviderError::AllProvidersFailed {
        method: method.to_string(),
        results,
    })
}

//! Service readiness.
//!
//! A service is implemented when the provider has a method attribute of that
//! name. Plain values and nested type references do not count.

use super::ReadinessMap;
use crate::provider::Provider;

/// Checks that a provider implements its declared service methods.
pub trait ServiceReadiness {
    /// Services the provider declares, in declaration order.
    fn services(&self) -> &[String];

    fn is_service_implemented(&self, service: &str) -> bool;

    /// Status of every declared service. Computed once, then cached.
    fn check_services(&self) -> &ReadinessMap;

    fn clear_services_cache(&mut self);

    fn are_services_implemented(&self) -> bool {
        self.check_services().values().all(|ready| *ready)
    }

    /// Declared services without a method, in declaration order.
    fn missing_services(&self) -> Vec<String> {
        self.check_services()
            .iter()
            .filter(|(_, ready)| !**ready)
            .map(|(service, _)| service.clone())
            .collect()
    }
}

impl ServiceReadiness for Provider {
    fn services(&self) -> &[String] {
        self.class().services()
    }

    fn is_service_implemented(&self, service: &str) -> bool {
        self.attribute(service).is_some_and(|attr| attr.is_method())
    }

    fn check_services(&self) -> &ReadinessMap {
        self.services_cache.get_or_init(|| {
            tracing::debug!("Checking services for provider '{}'", self.name());
            self.services()
                .iter()
                .map(|service| (service.clone(), self.is_service_implemented(service)))
                .collect()
        })
    }

    fn clear_services_cache(&mut self) {
        self.services_cache.take();
    }
}

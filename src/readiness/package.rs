//! Package readiness.

use super::ReadinessMap;
use crate::provider::Provider;

/// Checks that a provider's third-party packages are available.
pub trait PackageReadiness {
    /// Packages the provider declares, in declaration order.
    fn required_packages(&self) -> &[String];

    /// Whether one package resolves.
    fn is_package_installed(&self, package: &str) -> bool;

    /// Status of every required package. Computed once, then cached.
    fn check_packages(&self) -> &ReadinessMap;

    fn clear_packages_cache(&mut self);

    fn are_packages_installed(&self) -> bool {
        self.check_packages().values().all(|ready| *ready)
    }

    /// Required packages that do not resolve, in declaration order.
    fn missing_packages(&self) -> Vec<String> {
        self.check_packages()
            .iter()
            .filter(|(_, ready)| !**ready)
            .map(|(package, _)| package.clone())
            .collect()
    }
}

/// Import name of a distribution name: `-` and `.` become `_`.
pub fn normalize_package_name(package: &str) -> String {
    package.replace(['-', '.'], "_")
}

impl PackageReadiness for Provider {
    fn required_packages(&self) -> &[String] {
        self.class().required_packages()
    }

    fn is_package_installed(&self, package: &str) -> bool {
        let probe = self.probe();
        let normalized = normalize_package_name(package);
        probe.package_exists(&normalized) || (normalized != package && probe.package_exists(package))
    }

    fn check_packages(&self) -> &ReadinessMap {
        self.packages_cache.get_or_init(|| {
            tracing::debug!("Checking packages for provider '{}'", self.name());
            self.required_packages()
                .iter()
                .map(|package| (package.clone(), self.is_package_installed(package)))
                .collect()
        })
    }

    fn clear_packages_cache(&mut self) {
        self.packages_cache.take();
    }
}

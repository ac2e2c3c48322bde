//! Bundled alphabet providers.
//!
//! Every country provider lives in its own file under a region directory,
//! derives from [`base::class`], and is registered under
//! `providerkit::providers::{region}::{country}`. This directory is also
//! the package-default discovery root of the `providerkit` library.

pub mod africa;
pub mod asia;
pub mod base;
pub mod europe;

use std::path::PathBuf;

use crate::registry::TypeRegistry;

/// Library name whose providers live here.
pub const LIBRARY_NAME: &str = "providerkit";

/// Unit namespace of the bundled providers.
pub const NAMESPACE: &str = "providerkit::providers";

/// Source directory of the bundled providers.
pub fn providers_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/src/providers"))
}

/// Register the base class and every bundled provider.
pub fn register(registry: &mut TypeRegistry) {
    registry.register(base::class());
    asia::register(registry);
    europe::register(registry);
    africa::register(registry);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_six_providers_and_the_base() {
        let mut registry = TypeRegistry::new();
        register(&mut registry);
        assert_eq!(registry.len(), 7);
        assert!(registry
            .resolve("providerkit::providers::europe::spain::SpainAlphabetProvider")
            .is_some());
        assert!(registry
            .resolve("providerkit::providers::europe::spain::AlphabetProvider")
            .is_some());
    }

    #[test]
    fn providers_dir_exists() {
        assert!(providers_dir().join("asia").join("japan.rs").is_file());
    }
}

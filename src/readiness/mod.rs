//! Readiness checks for provider instances.
//!
//! Each checker maps every declared requirement to whether it is satisfied:
//!
//! - [`PackageReadiness`] - required packages resolve on the host
//! - [`ConfigReadiness`] - config keys are set, defaulted or in the environment
//! - [`ServiceReadiness`] - declared services have methods
//!
//! Results are computed lazily on first use and cached on the instance until
//! the matching `clear_*_cache` call. [`Costs`] rides along as the optional
//! pricing capability.

pub mod config;
pub mod cost;
pub mod package;
pub mod probe;
pub mod service;

use indexmap::IndexMap;

pub use config::ConfigReadiness;
pub use cost::{normalize_cost, Costs};
pub use package::{normalize_package_name, PackageReadiness};
pub use probe::{KnownPackages, PackageResolver, PathPackages, Probe, VarLookup};
pub use service::ServiceReadiness;

/// Requirement name to readiness, in declaration order.
pub type ReadinessMap = IndexMap<String, bool>;

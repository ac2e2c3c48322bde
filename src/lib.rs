//! providerkit - a registry of self-describing providers.
//!
//! A provider declares the packages it needs, the configuration keys it
//! reads and the service methods it offers. providerkit finds providers
//! (from records, a file, or by scanning a source directory), reports
//! whether each one is ready, and calls a service method across them.
//!
//! # Modules
//!
//! - [`provider`] - Provider types, instances and URLs
//! - [`readiness`] - Package, config, service and cost checks
//! - [`registry`] - Explicit registry of provider types by unit
//! - [`loader`] - Building provider collections from records, files and directories
//! - [`filter`] - Query and attribute filters
//! - [`invoke`] - Try-all and try-first invocation
//! - [`pipeline`] - Load, filter and invoke in one call
//! - [`format`] - Table, JSON, XML and raw rendering
//! - [`providers`] - Bundled alphabet providers
//! - [`cli`] - Command-line interface and argument parsing
//! - [`ui`] - Terminal output
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use providerkit::loader::{Loader, ProviderRecord};
//! use providerkit::readiness::{ConfigReadiness, Probe};
//! use providerkit::registry::TypeRegistry;
//!
//! let registry = TypeRegistry::with_builtins();
//! let loader = Loader::new(&registry, Rc::new(Probe::empty()));
//! let providers = loader.from_records(&[ProviderRecord::new(
//!     "providerkit::providers::asia::japan::JapanAlphabetProvider",
//! )]);
//!
//! let japan = &providers["japan_alphabet"];
//! assert_eq!(japan.display_name(), "Japan Alphabet Provider");
//! assert!(!japan.is_config_ready());
//! ```

pub mod cli;
pub mod error;
pub mod filter;
pub mod format;
pub mod invoke;
pub mod loader;
pub mod pipeline;
pub mod provider;
pub mod providers;
pub mod readiness;
pub mod registry;
pub mod ui;

pub use error::{ProviderError, Result};

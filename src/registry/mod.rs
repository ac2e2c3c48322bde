//! Type registry for providerkit.
//!
//! Rust has no runtime reflection, so every type that discovery or the
//! declarative loader may need is registered up front:
//!
//! - Provider classes, keyed by `unit::TypeName`
//! - Other types living in the same units
//! - Imports, so a unit can expose a type defined elsewhere
//! - Library roots for package-default discovery
//!
//! # Example
//!
//! ```
//! use providerkit::provider::ProviderClass;
//! use providerkit::registry::TypeRegistry;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(ProviderClass::new("MailProvider", "app::mail").with_name("mail"));
//!
//! let entry = registry.resolve("app::mail::MailProvider").unwrap();
//! assert_eq!(entry.as_provider().unwrap().name(), "mail");
//! ```

pub mod entry;
pub mod types;

// Re-exports
pub use entry::{Library, TypeEntry};
pub use types::{split_path, TypeRegistry};

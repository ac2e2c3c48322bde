//! Registry entries.

use std::path::PathBuf;
use std::rc::Rc;

use crate::provider::{ProviderClass, PATH_SEPARATOR};

/// A registered type.
#[derive(Debug, Clone)]
pub enum TypeEntry {
    /// A type conforming to the provider contract.
    Provider(Rc<ProviderClass>),
    /// Any other type living in a unit (helpers, clients, data types).
    Other { type_name: String, module: String },
}

impl TypeEntry {
    pub fn type_name(&self) -> &str {
        match self {
            TypeEntry::Provider(class) => class.type_name(),
            TypeEntry::Other { type_name, .. } => type_name,
        }
    }

    /// Unit the type is defined in.
    pub fn module(&self) -> &str {
        match self {
            TypeEntry::Provider(class) => class.module(),
            TypeEntry::Other { module, .. } => module,
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}{}{}", self.module(), PATH_SEPARATOR, self.type_name())
    }

    /// The provider class, if this type conforms to the contract.
    pub fn as_provider(&self) -> Option<&Rc<ProviderClass>> {
        match self {
            TypeEntry::Provider(class) => Some(class),
            TypeEntry::Other { .. } => None,
        }
    }
}

/// Where a library keeps its bundled providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    /// Directory scanned when no other source is given.
    pub providers_dir: PathBuf,
    /// Namespace the files in `providers_dir` are registered under.
    pub namespace: String,
}

impl Library {
    pub fn new(providers_dir: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            providers_dir: providers_dir.into(),
            namespace: namespace.into(),
        }
    }
}

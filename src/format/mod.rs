//! Rendering provider collections and invocation results.
//!
//! Listings support `table`, `json` and `xml`; results add `raw`. Both are
//! sorted by key. Formatting is separate from loading and invoking: the
//! pipeline returns collections, these functions return strings.

pub mod providers;
pub mod results;
pub mod xml;

use std::fmt;
use std::str::FromStr;

use crate::error::ProviderError;

pub use providers::{format_providers, provider_summary, service_status, NO_PROVIDERS};
pub use results::{format_results, NO_RESULTS};

/// Output format for provider listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Xml,
}

impl FromStr for OutputFormat {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            other => Err(ProviderError::InvalidFormat {
                format: other.to_string(),
                expected: "'table', 'json', or 'xml'".to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Xml => "xml",
        };
        f.write_str(name)
    }
}

/// Output format for invocation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultFormat {
    #[default]
    Table,
    Json,
    Xml,
    /// Each result printed as pretty JSON under a header line.
    Raw,
}

impl FromStr for ResultFormat {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            "raw" => Ok(Self::Raw),
            other => Err(ProviderError::InvalidFormat {
                format: other.to_string(),
                expected: "'table', 'json', 'xml', or 'raw'".to_string(),
            }),
        }
    }
}

impl fmt::Display for ResultFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Raw => "raw",
        };
        f.write_str(name)
    }
}

//! Error types for providerkit operations.
//!
//! This module defines [`ProviderError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Definition and discovery problems (bad class path, unreadable file)
//!   are logged and skipped by the loader; they never surface here
//! - Readiness failures are data, not errors
//! - `ProviderError` is reserved for conditions the caller must act on
//! - Provider service methods return `anyhow::Error`, which converts into
//!   `ProviderError::Other` when it has to cross the crate boundary

use std::path::PathBuf;
use thiserror::Error;

use crate::invoke::ResultMap;

/// Core error type for providerkit operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An explicitly supplied scan root does not exist.
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// An explicitly supplied scan root is not a directory.
    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A mandatory identification field is missing or empty.
    #[error("{field} is required and cannot be empty")]
    MissingField { field: String },

    /// A construction argument has the wrong shape.
    #[error("Invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// The pipeline was asked to invoke against an empty collection.
    #[error("No providers available")]
    NoProviders,

    /// No provider implements the requested method.
    #[error("Method '{method}' not found in any provider. {detail}")]
    MethodNotFound { method: String, detail: String },

    /// Every provider failed in try-first mode.
    #[error("Command '{method}' failed on all providers")]
    AllProvidersFailed { method: String, results: ResultMap },

    /// Unknown output format requested.
    #[error("Invalid format '{format}'. Must be {expected}.")]
    InvalidFormat { format: String, expected: String },

    /// Failed to parse a declarative provider file.
    #[error("Failed to parse provider config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for providerkit operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_not_found_displays_path() {
        let err = ProviderError::DirectoryNotFound {
            path: PathBuf::from("/missing/providers"),
        };
        assert!(err.to_string().contains("/missing/providers"));
    }

    #[test]
    fn not_a_directory_displays_path() {
        let err = ProviderError::NotADirectory {
            path: PathBuf::from("/etc/hosts"),
        };
        assert_eq!(err.to_string(), "Path is not a directory: /etc/hosts");
    }

    #[test]
    fn missing_field_names_the_field() {
        let err = ProviderError::MissingField {
            field: "display_name".into(),
        };
        assert_eq!(
            err.to_string(),
            "display_name is required and cannot be empty"
        );
    }

    #[test]
    fn method_not_found_includes_detail() {
        let err = ProviderError::MethodNotFound {
            method: "get_alphabet".into(),
            detail: "Checked providers: a, b".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'get_alphabet'"));
        assert!(msg.ends_with("Checked providers: a, b"));
    }

    #[test]
    fn all_providers_failed_names_method() {
        let err = ProviderError::AllProvidersFailed {
            method: "lookup".into(),
            results: ResultMap::new(),
        };
        assert_eq!(err.to_string(), "Command 'lookup' failed on all providers");
    }

    #[test]
    fn invalid_format_lists_expected() {
        let err = ProviderError::InvalidFormat {
            format: "yaml".into(),
            expected: "'table', 'json', or 'xml'".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid format 'yaml'. Must be 'table', 'json', or 'xml'."
        );
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ProviderError = io_err.into();
        assert!(matches!(err, ProviderError::Io(_)));
    }

    #[test]
    fn anyhow_error_is_transparent() {
        let err: ProviderError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}

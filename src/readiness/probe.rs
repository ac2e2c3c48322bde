//! Host probe used by readiness checks.
//!
//! Readiness checks never touch the process directly. Package lookups go
//! through a [`PackageResolver`] and environment variables through a lookup
//! function, both owned by a [`Probe`] that every provider instance shares.
//! Tests build a probe from fixed data instead of mutating the real
//! environment.
//!
//! # Example
//!
//! ```
//! use providerkit::readiness::{KnownPackages, Probe};
//!
//! let probe = Probe::new(KnownPackages::new(["serde_json"]), |key: &str| {
//!     (key == "API_KEY").then(|| "secret".to_string())
//! });
//!
//! assert!(probe.package_exists("serde_json"));
//! assert_eq!(probe.var("API_KEY").as_deref(), Some("secret"));
//! assert!(probe.var("OTHER").is_none());
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Answers whether a named package is available on the host.
///
/// This is an existence check only; resolving a package has no side effects.
pub trait PackageResolver {
    /// Whether `name` can be resolved.
    fn exists(&self, name: &str) -> bool;
}

impl<F> PackageResolver for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, name: &str) -> bool {
        self(name)
    }
}

/// A fixed set of available packages.
#[derive(Debug, Clone, Default)]
pub struct KnownPackages {
    names: HashSet<String>,
}

impl KnownPackages {
    /// Create a set from package names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a package to the set.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }
}

impl PackageResolver for KnownPackages {
    fn exists(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Resolves packages as executables on a search path.
#[derive(Debug, Clone, Default)]
pub struct PathPackages {
    entries: Vec<PathBuf>,
}

impl PathPackages {
    /// Search the given directories, in order.
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    /// Search the directories listed in the `PATH` environment variable.
    pub fn from_env() -> Self {
        Self::new(parse_system_path())
    }

    /// Directories searched by this resolver.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }
}

impl PackageResolver for PathPackages {
    fn exists(&self, name: &str) -> bool {
        resolve_tool_path(name, &self.entries).is_some()
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    if tool.is_empty() {
        return None;
    }
    path_entries
        .iter()
        .map(|dir| dir.join(tool))
        .find(|candidate| candidate.is_file() && is_executable(candidate))
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Environment variable lookup used by config readiness.
pub type VarLookup = Box<dyn Fn(&str) -> Option<String>>;

/// Host access shared by every provider built from one load call.
pub struct Probe {
    packages: Box<dyn PackageResolver>,
    vars: VarLookup,
}

impl Probe {
    /// Build a probe from a package resolver and an env lookup function.
    pub fn new<P, F>(packages: P, vars: F) -> Self
    where
        P: PackageResolver + 'static,
        F: Fn(&str) -> Option<String> + 'static,
    {
        Self {
            packages: Box::new(packages),
            vars: Box::new(vars),
        }
    }

    /// Probe the real host: executables on `PATH` and process env vars.
    pub fn system() -> Self {
        Self::new(PathPackages::from_env(), |key: &str| std::env::var(key).ok())
    }

    /// A probe that sees no packages and no environment variables.
    pub fn empty() -> Self {
        Self::new(KnownPackages::default(), |_: &str| None)
    }

    /// Whether the resolver knows `name`.
    pub fn package_exists(&self, name: &str) -> bool {
        self.packages.exists(name)
    }

    /// Look up an environment variable.
    pub fn var(&self, key: &str) -> Option<String> {
        (self.vars)(key)
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probe").finish_non_exhaustive()
    }
}

impl Default for Probe {
    fn default() -> Self {
        Self::system()
    }
}

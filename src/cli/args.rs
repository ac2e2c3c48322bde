//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use indexmap::IndexMap;
use serde_json::Value;

use crate::loader::ConfigFile;
use crate::pipeline::{LoadOptions, DEFAULT_LIB_NAME};
use crate::provider::ConfigMap;

/// providerkit - discover, check and call provider plugins.
#[derive(Debug, Parser)]
#[command(name = "providerkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Library whose bundled providers and config files are used
    #[arg(long, global = true, env = "PROVIDERKIT_LIB", default_value = DEFAULT_LIB_NAME)]
    pub lib: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List providers and their readiness
    List(ListArgs),

    /// Call a service method on providers
    Try(TryArgs),

    /// Print the JSON schema of the provider config file
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where providers come from and how they are narrowed.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Load provider records from a JSON or YAML file. Without a path, the
    /// default locations are searched
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub json: Option<Option<PathBuf>>,

    /// Discover providers in a source directory
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Unit namespace of the discovery directory
    #[arg(long, value_name = "NAMESPACE")]
    pub base_namespace: Option<String>,

    /// Keep providers whose name, display name or description contains QUERY
    #[arg(long, value_name = "QUERY")]
    pub filter: Option<String>,

    /// Keep providers whose attribute matches (repeatable)
    #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub attributes: Vec<(String, String)>,
}

impl SourceArgs {
    /// Translate the flags into pipeline options for library `lib`.
    pub fn load_options(&self, lib: &str) -> LoadOptions {
        let file = self.json.as_ref().map(|path| match path {
            Some(path) => ConfigFile::Path(path.clone()),
            None => ConfigFile::search(lib),
        });

        LoadOptions {
            file,
            dir: self.dir.clone(),
            base_namespace: self.base_namespace.clone(),
            lib_name: lib.to_string(),
            query: self.filter.clone(),
            attributes: self.attributes.iter().cloned().collect::<IndexMap<_, _>>(),
            ..Default::default()
        }
    }
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format: table, json or xml
    #[arg(long, default_value = "table")]
    pub format: String,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            source: SourceArgs::default(),
            format: "table".to_string(),
        }
    }
}

/// Arguments for the `try` command.
#[derive(Debug, Clone, Args)]
pub struct TryArgs {
    /// Service method to call
    pub method: String,

    /// Method arguments: KEY=VALUE pairs; a first bare word becomes `query`,
    /// later bare words are set to true
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// Stop at the first provider that succeeds
    #[arg(long)]
    pub first: bool,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format: table, json, xml or raw
    #[arg(long, default_value = "table")]
    pub format: String,
}

impl TryArgs {
    /// The method arguments as a config map.
    pub fn method_args(&self) -> ConfigMap {
        let mut map = ConfigMap::new();
        let mut first_positional = true;

        for arg in &self.args {
            match arg.split_once('=') {
                Some((key, value)) => {
                    map.insert(key.to_string(), Value::String(value.to_string()));
                }
                None if first_positional => {
                    map.insert("query".to_string(), Value::String(arg.clone()));
                }
                None => {
                    map.insert(arg.clone(), Value::Bool(true));
                }
            }
            first_positional = false;
        }

        map
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parse a `KEY=VALUE` pair.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!(
            "Invalid attribute format: {}. Expected format: key=value",
            s
        )),
    }
}

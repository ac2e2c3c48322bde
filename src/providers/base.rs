//! Shared base for the alphabet providers.
//!
//! Country providers derive from [`class`] and add `get_alphabet`. The base
//! contributes `calculate_letters`, which measures the alphabet in one of
//! three formats:
//!
//! - `count`: number of letters
//! - `len`: total characters across letters
//! - `bytes` (alias `poid`): total UTF-8 size

use std::collections::BTreeSet;

use anyhow::{anyhow, bail};
use serde_json::Value;

use crate::provider::{ConfigMap, Provider, ProviderClass};

pub const TYPE_NAME: &str = "AlphabetProvider";

/// The abstract alphabet provider. It has no name and cannot be built.
pub fn class() -> ProviderClass {
    ProviderClass::new(TYPE_NAME, module_path!())
        .with_services(["get_alphabet", "calculate_letters"])
        .with_attribute("cost_get_alphabet", "free")
        .with_attribute("cost_calculate_letters", 0)
        .with_method("calculate_letters", calculate_letters)
}

fn alphabet(provider: &Provider) -> anyhow::Result<Vec<String>> {
    let value = provider
        .call("get_alphabet", &ConfigMap::new())
        .ok_or_else(|| anyhow!("'{}' does not implement get_alphabet", provider.name()))??;
    Ok(serde_json::from_value(value)?)
}

fn calculate_letters(provider: &Provider, args: &ConfigMap) -> anyhow::Result<Value> {
    let format = args.get("format").and_then(Value::as_str).unwrap_or("count");
    let letters = alphabet(provider)?;

    let total = match format {
        "count" => letters.len(),
        "len" => letters.iter().map(|l| l.chars().count()).sum(),
        "bytes" | "poid" => letters.iter().map(String::len).sum(),
        other => bail!(
            "Invalid format '{}'. Must be 'count', 'len', or 'bytes'.",
            other
        ),
    };
    Ok(Value::from(total))
}

/// `A` to `Z`.
pub(crate) fn latin() -> impl Iterator<Item = String> {
    ('A'..='Z').map(String::from)
}

/// Deduplicate and sort by code point.
pub(crate) fn sorted_letters(letters: impl IntoIterator<Item = String>) -> Vec<String> {
    letters
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

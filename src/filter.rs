//! Narrowing provider collections.
//!
//! Both filters keep insertion order and return the surviving providers.

use indexmap::IndexMap;
use serde_json::Value;

use crate::provider::ProviderMap;

/// Fields searched by [`filter_by_query`] when none are given.
pub const DEFAULT_SEARCH_FIELDS: &[&str] = &["name", "display_name", "description"];

/// Tokens that match a `true` boolean attribute.
const TRUTHY: &[&str] = &["true", "1", "yes", "on"];

/// Keep providers where any searched field contains `query`, ignoring case.
///
/// Empty fields never match. A missing or empty query keeps everything.
pub fn filter_by_query(
    mut providers: ProviderMap,
    query: Option<&str>,
    search_fields: Option<&[&str]>,
    extra_fields: &[&str],
) -> ProviderMap {
    let query = match query {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return providers,
    };

    let fields: Vec<&str> = search_fields
        .unwrap_or(DEFAULT_SEARCH_FIELDS)
        .iter()
        .chain(extra_fields)
        .copied()
        .collect();

    providers.retain(|_, provider| {
        fields.iter().any(|field| {
            provider
                .resolve_attribute(field, false)
                .map(|value| stringify(&value))
                .is_some_and(|text| !text.is_empty() && text.to_lowercase().contains(&query))
        })
    });
    providers
}

/// Keep providers matching every `attribute => search` predicate.
///
/// Methods are invoked with no arguments to get their value. A provider
/// without the attribute is dropped. Booleans match the tokens `true`, `1`,
/// `yes` and `on`; everything else matches by case-insensitive substring.
pub fn filter_by_attributes(
    mut providers: ProviderMap,
    predicates: &IndexMap<String, String>,
) -> ProviderMap {
    if predicates.is_empty() {
        return providers;
    }

    providers.retain(|_, provider| {
        predicates.iter().all(|(attribute, search)| {
            let Some(value) = provider.resolve_attribute(attribute, true) else {
                return false;
            };
            let search = search.to_lowercase();
            match value {
                Value::Bool(flag) => flag == TRUTHY.contains(&search.as_str()),
                other => stringify(&other).to_lowercase().contains(&search),
            }
        })
    });
    providers
}

/// String form of a value: strings unquoted, everything else as JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

//! Provider listings.

use serde::Serialize;

use super::xml::XmlWriter;
use super::OutputFormat;
use crate::provider::{Provider, ProviderMap};
use crate::readiness::{ConfigReadiness, PackageReadiness, ReadinessMap, ServiceReadiness};
use crate::ui::Table;

/// Printed instead of an empty listing.
pub const NO_PROVIDERS: &str = "No providers found.";

const HEADERS: [&str; 6] = [
    "Name",
    "Display Name",
    "Description",
    "Config",
    "Package",
    "Service",
];
const MAX_WIDTHS: [usize; 6] = [20, 30, 40, 8, 8, 10];

const READY: &str = "✓";
const NOT_READY: &str = "✗";

/// Readiness detail of one provider, as listed in JSON and XML.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSummary {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub class: String,
    pub class_path: String,
    /// Source file relative to the scan root, for discovered providers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Unit the source file was mapped to, for discovered providers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub config_ready: bool,
    pub config_valid: Vec<String>,
    pub config_invalid: Vec<String>,
    pub packages_installed: bool,
    pub packages_installed_list: Vec<String>,
    pub packages_missing: Vec<String>,
    pub services_implemented: bool,
    pub services_implemented_count: String,
    pub services_implemented_list: Vec<String>,
    pub services_missing: Vec<String>,
}

fn ready_keys(status: &ReadinessMap) -> Vec<String> {
    status
        .iter()
        .filter(|(_, ready)| **ready)
        .map(|(key, _)| key.clone())
        .collect()
}

fn service_count(provider: &Provider) -> (usize, usize) {
    let status = provider.check_services();
    (status.values().filter(|ready| **ready).count(), status.len())
}

/// Collect the listing detail for `provider` under collection key `name`.
pub fn provider_summary(name: &str, provider: &Provider) -> ProviderSummary {
    let class = provider.class();
    let (implemented, total) = service_count(provider);

    ProviderSummary {
        name: name.to_string(),
        display_name: provider.display_name().to_string(),
        description: provider.description().map(str::to_string),
        class: class.type_name().to_string(),
        class_path: class.qualified_name(),
        path: provider.path().map(str::to_string),
        unit: provider.class_path().map(str::to_string),
        config_ready: provider.is_config_ready(),
        config_valid: ready_keys(provider.check_config()),
        config_invalid: provider.missing_config_keys(),
        packages_installed: provider.are_packages_installed(),
        packages_installed_list: ready_keys(provider.check_packages()),
        packages_missing: provider.missing_packages(),
        services_implemented: provider.are_services_implemented(),
        services_implemented_count: format!("{}/{}", implemented, total),
        services_implemented_list: ready_keys(provider.check_services()),
        services_missing: provider.missing_services(),
    }
}

/// Service column: `✓` when all are implemented, `N/A` when none are
/// declared, otherwise `implemented/total`.
pub fn service_status(provider: &Provider) -> String {
    let (implemented, total) = service_count(provider);
    if total == 0 {
        "N/A".to_string()
    } else if implemented == total {
        READY.to_string()
    } else {
        format!("{}/{}", implemented, total)
    }
}

fn mark(ready: bool) -> &'static str {
    if ready {
        READY
    } else {
        NOT_READY
    }
}

fn sorted(providers: &ProviderMap) -> Vec<(&String, &Provider)> {
    let mut entries: Vec<_> = providers.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

fn format_table(providers: &ProviderMap) -> String {
    let mut table = Table::new(HEADERS.to_vec()).with_max_widths(&MAX_WIDTHS);

    for (name, provider) in sorted(providers) {
        let services = service_status(provider);
        table.add_row(vec![
            name.as_str(),
            provider.display_name(),
            provider.description().unwrap_or(""),
            mark(provider.is_config_ready()),
            mark(provider.are_packages_installed()),
            services.as_str(),
        ]);
    }

    table.render()
}

fn format_json(providers: &ProviderMap) -> String {
    let summaries: Vec<ProviderSummary> = sorted(providers)
        .into_iter()
        .map(|(name, provider)| provider_summary(name, provider))
        .collect();
    serde_json::to_string_pretty(&summaries).unwrap_or_else(|_| "[]".to_string())
}

fn format_xml(providers: &ProviderMap) -> String {
    let mut xml = XmlWriter::new();
    xml.start("providers");

    for (name, provider) in sorted(providers) {
        let s = provider_summary(name, provider);
        xml.start("provider")
            .text("name", &s.name)
            .text("display_name", &s.display_name);
        if let Some(description) = s.description.as_deref().filter(|d| !d.is_empty()) {
            xml.text("description", description);
        }
        xml.text("class", &s.class)
            .text("class_path", &s.class_path);
        if let Some(path) = &s.path {
            xml.text("path", path);
        }
        if let Some(unit) = &s.unit {
            xml.text("unit", unit);
        }
        xml.text("config_ready", &s.config_ready.to_string())
            .list("config_valid", "key", &s.config_valid)
            .list("config_invalid", "key", &s.config_invalid)
            .text("packages_installed", &s.packages_installed.to_string())
            .list("packages_installed_list", "package", &s.packages_installed_list)
            .list("packages_missing", "package", &s.packages_missing)
            .text("services_implemented", &s.services_implemented.to_string())
            .text("services_implemented_count", &s.services_implemented_count)
            .list("services_implemented_list", "service", &s.services_implemented_list)
            .list("services_missing", "service", &s.services_missing)
            .end();
    }

    xml.finish()
}

/// Render a provider collection. Empty collections render as
/// [`NO_PROVIDERS`] in every format.
pub fn format_providers(providers: &ProviderMap, format: OutputFormat) -> String {
    if providers.is_empty() {
        return NO_PROVIDERS.to_string();
    }

    match format {
        OutputFormat::Table => format_table(providers),
        OutputFormat::Json => format_json(providers),
        OutputFormat::Xml => format_xml(providers),
    }
}

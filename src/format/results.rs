//! Invocation results.

use serde_json::{json, Value};

use super::xml::XmlWriter;
use super::ResultFormat;
use crate::filter::stringify;
use crate::invoke::{Outcome, ResultMap};
use crate::ui::Table;

/// Printed instead of an empty result table.
pub const NO_RESULTS: &str = "No results found.";

/// Characters of a result or error kept in the table before `...`.
const CELL_LIMIT: usize = 47;

fn sorted(results: &ResultMap) -> Vec<(&String, &Outcome)> {
    let mut entries: Vec<_> = results.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

/// The text shown for an outcome: the result, the error, or every
/// readiness error joined with `; `.
fn detail(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Success { result, .. } => stringify(result),
        Outcome::Failed { error, .. } => error.clone(),
        Outcome::NotReady { errors, .. } => errors.join("; "),
    }
}

fn clip(text: &str) -> String {
    if text.chars().count() > CELL_LIMIT {
        let kept: String = text.chars().take(CELL_LIMIT).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

fn format_table(results: &ResultMap) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut table = Table::new(vec!["Provider", "Status", "Result/Error"]);
    for (name, outcome) in sorted(results) {
        let status = if outcome.is_success() {
            "✓ Success"
        } else {
            "✗ Error"
        };
        let text = clip(&detail(outcome));
        table.add_row(vec![name.as_str(), status, text.as_str()]);
    }
    table.render()
}

fn format_json(results: &ResultMap) -> String {
    let items: Vec<Value> = sorted(results)
        .into_iter()
        .map(|(name, outcome)| {
            let mut item = json!({
                "provider": name,
                "provider_display": outcome.display_name(),
            });
            let extra = match outcome {
                Outcome::Success { result, .. } => json!({"status": "success", "result": result}),
                Outcome::Failed { error, .. } => json!({"status": "error", "error": error}),
                Outcome::NotReady { errors, .. } => json!({"status": "error", "errors": errors}),
            };
            if let (Some(item), Value::Object(extra)) = (item.as_object_mut(), extra) {
                item.extend(extra);
            }
            item
        })
        .collect();

    serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string())
}

fn format_xml(results: &ResultMap) -> String {
    if results.is_empty() {
        return "<results></results>".to_string();
    }

    let mut xml = XmlWriter::new();
    xml.start("results");
    for (name, outcome) in sorted(results) {
        xml.start("provider")
            .text("name", name)
            .text("display_name", outcome.display_name());
        match outcome {
            Outcome::Success { result, .. } => {
                xml.text("status", "success").text("result", &stringify(result));
            }
            Outcome::Failed { error, .. } => {
                xml.text("status", "error").text("error", error);
            }
            Outcome::NotReady { errors, .. } => {
                xml.text("status", "error").list("errors", "error", errors);
            }
        }
        xml.end();
    }
    xml.finish()
}

fn format_raw(results: &ResultMap) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut lines = Vec::new();
    for (name, outcome) in sorted(results) {
        let display = outcome.display_name();
        match outcome {
            Outcome::Success { result, .. } => {
                lines.push(format!("=== {} ({}) ===", display, name));
                lines.push(
                    serde_json::to_string_pretty(result).unwrap_or_else(|_| stringify(result)),
                );
            }
            Outcome::Failed { error, .. } => {
                lines.push(format!("=== {} ({}) - ERROR ===", display, name));
                lines.push(error.clone());
            }
            Outcome::NotReady { errors, .. } => {
                lines.push(format!("=== {} ({}) - ERROR ===", display, name));
                lines.extend(errors.iter().cloned());
            }
        }
        lines.push(String::new());
    }

    lines.join("\n").trim_end().to_string()
}

/// Render invocation results.
pub fn format_results(results: &ResultMap, format: ResultFormat) -> String {
    match format {
        ResultFormat::Table => format_table(results),
        ResultFormat::Json => format_json(results),
        ResultFormat::Xml => format_xml(results),
        ResultFormat::Raw => format_raw(results),
    }
}

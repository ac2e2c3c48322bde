//! Schema command implementation.
//!
//! The `providerkit schema` command prints the JSON schema of the
//! declarative provider file read by `--json`.

use serde_json::{json, Value};

use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// JSON schema of a provider records file.
pub fn records_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "providerkit providers",
        "description": "Providers to instantiate, in order. Later entries with the same name replace earlier ones.",
        "type": "array",
        "items": {
            "type": "object",
            "required": ["class"],
            "properties": {
                "class": {
                    "type": "string",
                    "description": "Qualified type name, `unit::path::TypeName`",
                    "pattern": "^[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)+$"
                },
                "config": {
                    "type": "object",
                    "description": "Configuration values, filtered to the provider's config keys",
                    "additionalProperties": true
                },
                "kwargs": {
                    "type": "object",
                    "description": "Field overrides (name, display_name, description, urls) and extra attributes",
                    "properties": {
                        "name": {"type": "string", "minLength": 1},
                        "display_name": {"type": "string", "minLength": 1},
                        "description": {"type": "string"},
                        "documentation_url": {"type": "string"},
                        "site_url": {"type": "string"},
                        "status_url": {"type": "string"},
                        "provider_can_be_used": {"type": "boolean"}
                    },
                    "additionalProperties": true
                }
            }
        }
    })
}

/// The schema command implementation.
#[derive(Debug, Default)]
pub struct SchemaCommand;

impl SchemaCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let schema = serde_json::to_string_pretty(&records_schema())
            .map_err(|e| anyhow::anyhow!("Failed to render schema: {}", e))?;
        ui.output(&schema);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::ProviderRecord;
    use crate::ui::MockUI;

    #[test]
    fn prints_schema() {
        let mut ui = MockUI::new();
        let result = SchemaCommand::new().execute(&mut ui).unwrap();
        assert!(result.success);

        let schema: Value = serde_json::from_str(&ui.outputs()[0]).unwrap();
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["required"], json!(["class"]));
    }

    #[test]
    fn schema_properties_match_records() {
        let record = serde_json::to_value(ProviderRecord::new("a::B")).unwrap();
        let schema = records_schema();
        for key in record.as_object().unwrap().keys() {
            assert!(
                schema["items"]["properties"].get(key).is_some(),
                "schema lacks {}",
                key
            );
        }
    }
}

//! Try command implementation.
//!
//! The `providerkit try <method>` command calls a service method on every
//! ready provider, or with `--first` on providers until one succeeds.

use std::rc::Rc;

use crate::cli::args::TryArgs;
use crate::error::{ProviderError, Result};
use crate::format::{format_results, ResultFormat};
use crate::pipeline::{try_providers, try_providers_first};
use crate::readiness::Probe;
use crate::registry::TypeRegistry;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The try command implementation.
pub struct TryCommand<'a> {
    registry: &'a TypeRegistry,
    probe: Rc<Probe>,
    lib: String,
    args: TryArgs,
}

impl<'a> TryCommand<'a> {
    /// Create a new try command.
    pub fn new(registry: &'a TypeRegistry, probe: Rc<Probe>, lib: &str, args: TryArgs) -> Self {
        Self {
            registry,
            probe,
            lib: lib.to_string(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &TryArgs {
        &self.args
    }
}

impl Command for TryCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let format: ResultFormat = self.args.format.parse()?;
        let options = self.args.source.load_options(&self.lib);
        super::warn_missing_file(&options, ui);
        let method_args = self.args.method_args();
        let method = self.args.method.as_str();
        let probe = Rc::clone(&self.probe);

        let results = if self.args.first {
            match try_providers_first(self.registry, probe, method, None, &options, &method_args) {
                Ok(first) => first.into_results(),
                Err(ProviderError::AllProvidersFailed { method, results }) => {
                    ui.output(&format_results(&results, format));
                    ui.error(&format!("Command '{}' failed on all providers", method));
                    return Ok(CommandResult::failure(1));
                }
                Err(e) => return Err(e),
            }
        } else {
            try_providers(self.registry, probe, method, None, &options, &method_args)?
        };

        ui.output(&format_results(&results, format));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::SourceArgs;
    use crate::readiness::KnownPackages;
    use crate::ui::MockUI;
    use serde_json::Value;

    fn args(method: &str, extra: &[&str]) -> TryArgs {
        TryArgs {
            method: method.to_string(),
            args: extra.iter().map(|s| s.to_string()).collect(),
            first: false,
            source: SourceArgs::default(),
            format: "json".to_string(),
        }
    }

    /// A probe under which the Spanish provider is fully ready.
    fn spain_ready() -> Rc<Probe> {
        Rc::new(Probe::new(
            KnownPackages::new(["spanish_alphabet", "spanish_char_utils"]),
            |key: &str| key.starts_with("SPAIN_").then(|| "set".to_string()),
        ))
    }

    fn all_ready() -> Rc<Probe> {
        Rc::new(Probe::new(|_: &str| true, |_: &str| Some("set".to_string())))
    }

    fn run(probe: Rc<Probe>, args: TryArgs) -> (Result<CommandResult>, MockUI) {
        let registry = TypeRegistry::with_builtins();
        let cmd = TryCommand::new(&registry, probe, "providerkit", args);
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui);
        (result, ui)
    }

    #[test]
    fn unready_providers_report_reasons() {
        let (result, ui) = run(Rc::new(Probe::empty()), args("get_alphabet", &[]));
        assert!(result.unwrap().success);

        let json: Value = serde_json::from_str(&ui.outputs()[0]).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 6);
        assert!(json[0]["errors"][0]
            .as_str()
            .unwrap()
            .starts_with("Packages missing"));
    }

    #[test]
    fn ready_provider_answers() {
        let (result, ui) = run(spain_ready(), args("calculate_letters", &["format=count"]));
        assert!(result.unwrap().success);

        let json: Value = serde_json::from_str(&ui.outputs()[0]).unwrap();
        let spain = json
            .as_array()
            .unwrap()
            .iter()
            .find(|item| item["provider"] == "spain_alphabet")
            .unwrap();
        assert_eq!(spain["status"], "success");
        assert_eq!(spain["result"], 66);
    }

    #[test]
    fn first_mode_returns_one_result() {
        let mut try_args = args("get_alphabet", &[]);
        try_args.first = true;
        let (result, ui) = run(spain_ready(), try_args);
        assert!(result.unwrap().success);

        let json: Value = serde_json::from_str(&ui.outputs()[0]).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["provider"], "spain_alphabet");
    }

    #[test]
    fn raw_format_prints_each_answer() {
        let mut try_args = args("calculate_letters", &["format=count"]);
        try_args.format = "raw".to_string();
        let (result, ui) = run(all_ready(), try_args);
        assert!(result.unwrap().success);
        assert!(ui.has_output("=== Japan Alphabet Provider (japan_alphabet) ===\n46"));
    }

    #[test]
    fn first_mode_failure_exits_nonzero() {
        let mut try_args = args("get_alphabet", &[]);
        try_args.first = true;
        let (result, ui) = run(Rc::new(Probe::empty()), try_args);

        let result = result.unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("failed on all providers"));
        assert!(ui.has_output("Packages missing"));
    }

    #[test]
    fn unknown_method_is_an_error() {
        let (result, _) = run(all_ready(), args("teleport", &[]));
        assert!(matches!(
            result.unwrap_err(),
            ProviderError::MethodNotFound { .. }
        ));
    }
}

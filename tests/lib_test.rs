//! Library integration tests.

use providerkit::ProviderError;

#[test]
fn error_types_are_public() {
    let err = ProviderError::MissingField {
        field: "name".into(),
    };
    assert_eq!(err.to_string(), "name is required and cannot be empty");
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> providerkit::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use providerkit::cli::{Cli, Commands};

    let cli = Cli::parse_from(["providerkit", "try", "get_alphabet", "--first"]);
    if let Commands::Try(args) = cli.command {
        assert!(args.first);
        assert_eq!(args.method, "get_alphabet");
    } else {
        panic!("Expected Try command");
    }
}

#[test]
fn urls_are_reachable_through_the_trait() {
    use providerkit::provider::{ConfigMap, HasUrls, ProviderClass, Urls};
    use providerkit::readiness::Probe;
    use std::rc::Rc;

    let provider = ProviderClass::new("DocsProvider", "app::docs")
        .with_name("docs")
        .with_urls(Urls::new("https://docs.example", "https://example", "https://status.example"))
        .instantiate(Rc::new(Probe::empty()), None, &ConfigMap::new())
        .unwrap();
    assert_eq!(provider.documentation_url(), Some("https://docs.example"));
    assert_eq!(provider.status_url(), Some("https://status.example"));
}

#[test]
fn costs_are_public() {
    use providerkit::loader::{Loader, ProviderRecord};
    use providerkit::readiness::{Costs, Probe};
    use providerkit::registry::TypeRegistry;
    use serde_json::json;
    use std::rc::Rc;

    let registry = TypeRegistry::with_builtins();
    let providers = Loader::new(&registry, Rc::new(Probe::empty())).from_records(&[
        ProviderRecord::new("providerkit::providers::europe::spain::SpainAlphabetProvider"),
    ]);
    let spain = &providers["spain_alphabet"];
    assert_eq!(spain.cost("get_alphabet"), Some(json!("free")));
}

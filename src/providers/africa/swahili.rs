//! Swahili alphabet provider (Latin without Q and X).

use serde_json::Value;

use crate::provider::{ProviderClass, Urls};
use crate::providers::base;

fn alphabet() -> Vec<String> {
    let upper: Vec<String> = base::latin().filter(|c| c != "Q" && c != "X").collect();
    let lower: Vec<String> = upper.iter().map(|c| c.to_lowercase()).collect();
    base::sorted_letters(upper.into_iter().chain(lower))
}

pub fn class() -> ProviderClass {
    base::class()
        .derive("SwahiliAlphabetProvider", module_path!())
        .with_name("swahili_alphabet")
        .with_display_name("Swahili Alphabet Provider")
        .with_description("Provider for Swahili alphabet (Latin-based)")
        .with_services(["get_alphabet"])
        .with_config_keys(["SWAHILI_API_KEY", "SWAHILI_COUNTRY", "SWAHILI_DIALECT"])
        .with_required_packages(["swahili-alphabet", "swahili-lang"])
        .with_urls(Urls::new(
            "https://www.tanzania.go.tz/about",
            "https://www.tanzania.go.tz",
            "https://www.tanzania.go.tz/news",
        ))
        .with_attribute("country_code", "TZ")
        .with_attribute("continent", "africa")
        .with_attribute("country", "Tanzania")
        .with_method("get_alphabet", |_, _| Ok(Value::from(alphabet())))
}

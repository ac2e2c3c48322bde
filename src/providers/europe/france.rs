//! French alphabet provider (Latin with diacritics).

use serde_json::Value;

use crate::provider::{ProviderClass, Urls};
use crate::providers::base;

const DIACRITICS: [&str; 15] = [
    "À", "Â", "Ä", "È", "É", "Ê", "Ë", "Î", "Ï", "Ô", "Ö", "Ù", "Û", "Ü", "Ÿ",
];

fn alphabet() -> Vec<String> {
    let upper: Vec<String> = base::latin()
        .chain(DIACRITICS.iter().map(|c| c.to_string()))
        .collect();
    let lower: Vec<String> = upper.iter().map(|c| c.to_lowercase()).collect();
    base::sorted_letters(upper.into_iter().chain(lower))
}

pub fn class() -> ProviderClass {
    base::class()
        .derive("FranceAlphabetProvider", module_path!())
        .with_name("france_alphabet")
        .with_display_name("France Alphabet Provider")
        .with_description("Provider for French alphabet (Latin with diacritics)")
        .with_services(["get_alphabet"])
        .with_config_keys(["FRANCE_API_KEY", "FRANCE_LOCALE", "FRANCE_DIACRITICS"])
        .with_required_packages(["french-alphabet", "diacritics-handler"])
        .with_urls(Urls::new(
            "https://www.gouvernement.fr/qui-est-membre-du-gouvernement",
            "https://www.gouvernement.fr",
            "https://www.gouvernement.fr/actualites",
        ))
        .with_attribute("country_code", "FR")
        .with_attribute("continent", "europe")
        .with_attribute("country", "France")
        .with_method("get_alphabet", |_, _| Ok(Value::from(alphabet())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_both_cases_of_diacritics() {
        let letters = alphabet();
        assert_eq!(letters.len(), 82);
        assert!(letters.iter().any(|l| l == "ÿ"));
        assert!(letters.iter().any(|l| l == "É"));
    }
}

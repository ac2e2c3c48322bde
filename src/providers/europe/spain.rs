//! Spanish alphabet provider (Latin with Ñ).

use serde_json::Value;

use crate::provider::{ProviderClass, Urls};
use crate::providers::base;

const SPECIAL: [&str; 2] = ["Ñ", "ñ"];

const DIACRITICS: [&str; 12] = ["Á", "É", "Í", "Ó", "Ú", "Ü", "á", "é", "í", "ó", "ú", "ü"];

fn alphabet() -> Vec<String> {
    let lower: Vec<String> = base::latin().map(|c| c.to_lowercase()).collect();
    let extra = SPECIAL.iter().chain(DIACRITICS.iter()).map(|c| c.to_string());
    base::sorted_letters(base::latin().chain(extra).chain(lower))
}

pub fn class() -> ProviderClass {
    base::class()
        .derive("SpainAlphabetProvider", module_path!())
        .with_name("spain_alphabet")
        .with_display_name("Spain Alphabet Provider")
        .with_description("Provider for Spanish alphabet (Latin with Ñ)")
        .with_services(["get_alphabet"])
        .with_config_keys(["SPAIN_API_KEY", "SPAIN_REGION", "SPAIN_ENCODING"])
        .with_required_packages(["spanish-alphabet", "spanish-char-utils"])
        .with_urls(Urls::new(
            "https://www.lamoncloa.gob.es/Paginas/index.aspx",
            "https://www.lamoncloa.gob.es",
            "https://www.lamoncloa.gob.es/Paginas/actividad.aspx",
        ))
        .with_attribute("country_code", "ES")
        .with_attribute("continent", "europe")
        .with_attribute("country", "Spain")
        .with_method("get_alphabet", |_, _| Ok(Value::from(alphabet())))
}

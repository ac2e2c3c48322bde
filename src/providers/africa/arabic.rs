//! Arabic alphabet provider (Abjad script).

use serde_json::json;

use crate::provider::{ProviderClass, Urls};
use crate::providers::base;

const ABJAD: [&str; 28] = [
    "ا", "ب", "ت", "ث", "ج", "ح", "خ", "د", "ذ", "ر", "ز", "س", "ش", "ص", "ض", "ط", "ظ", "ع", "غ",
    "ف", "ق", "ك", "ل", "م", "ن", "ه", "و", "ي",
];

pub fn class() -> ProviderClass {
    base::class()
        .derive("ArabicAlphabetProvider", module_path!())
        .with_name("arabic_alphabet")
        .with_display_name("Arabic Alphabet Provider")
        .with_description("Provider for Arabic alphabet (Abjad script)")
        .with_services(["get_alphabet"])
        .with_config_keys(["ARABIC_API_KEY", "ARABIC_DIRECTION", "ARABIC_SCRIPT"])
        .with_required_packages(["arabic-alphabet", "arabic-text-processor"])
        .with_urls(Urls::new(
            "https://www.un.org/ar/about-un",
            "https://www.un.org/ar",
            "https://www.un.org/ar/news",
        ))
        .with_attribute("country_code", "SA")
        .with_attribute("continent", "africa")
        .with_attribute("country", "Saudi Arabia")
        .with_method("get_alphabet", |_, _| Ok(json!(ABJAD)))
}

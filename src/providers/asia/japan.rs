//! Japanese alphabet provider (Hiragana).

use serde_json::json;

use crate::provider::{ProviderClass, Urls};
use crate::providers::base;

const HIRAGANA: [&str; 46] = [
    "あ", "い", "う", "え", "お", "か", "き", "く", "け", "こ", "さ", "し", "す", "せ", "そ", "た",
    "ち", "つ", "て", "と", "な", "に", "ぬ", "ね", "の", "は", "ひ", "ふ", "へ", "ほ", "ま", "み",
    "む", "め", "も", "や", "ゆ", "よ", "ら", "り", "る", "れ", "ろ", "わ", "を", "ん",
];

pub fn class() -> ProviderClass {
    base::class()
        .derive("JapanAlphabetProvider", module_path!())
        .with_name("japan_alphabet")
        .with_display_name("Japan Alphabet Provider")
        .with_description("Provider for Japanese alphabet (Hiragana)")
        .with_services(["get_alphabet"])
        .with_config_keys(["JAPAN_API_KEY", "JAPAN_API_TOKEN", "JAPAN_CHARSET"])
        .with_required_packages(["japanese-alphabet", "hiragana-parser"])
        .with_urls(Urls::new(
            "https://www.gov-online.go.jp/useful",
            "https://www.gov-online.go.jp",
            "https://www.gov-online.go.jp/eng/publicity",
        ))
        .with_attribute("country_code", "JP")
        .with_attribute("continent", "asia")
        .with_attribute("country", "Japan")
        .with_method("get_alphabet", |_, _| Ok(json!(&HIRAGANA[..])))
}

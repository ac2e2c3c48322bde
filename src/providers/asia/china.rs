//! Chinese alphabet provider (common Hanzi).

use serde_json::json;

use crate::provider::{ProviderClass, Urls};
use crate::providers::base;

const HANZI: [&str; 30] = [
    "一", "二", "三", "四", "五", "六", "七", "八", "九", "十", "人", "大", "小", "中", "国", "水",
    "火", "木", "金", "土", "天", "地", "日", "月", "山", "川", "田", "口", "手", "目",
];

pub fn class() -> ProviderClass {
    base::class()
        .derive("ChinaAlphabetProvider", module_path!())
        .with_name("china_alphabet")
        .with_display_name("China Alphabet Provider")
        .with_description("Provider for Chinese alphabet (Hanzi characters)")
        .with_services(["get_alphabet"])
        .with_config_keys(["CHINA_API_KEY", "CHINA_API_SECRET", "CHINA_ENCODING"])
        .with_required_packages(["chinese-alphabet", "hanzi-utils"])
        .with_urls(Urls::new(
            "https://www.gov.cn/zhengce/zhengceku",
            "https://www.gov.cn",
            "https://www.gov.cn/xinwen",
        ))
        .with_attribute("country_code", "CN")
        .with_attribute("continent", "asia")
        .with_attribute("country", "China")
        .with_method("get_alphabet", |_, _| Ok(json!(HANZI)))
}

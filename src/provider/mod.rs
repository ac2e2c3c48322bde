//! The provider entity.
//!
//! - [`ProviderClass`] - static description of a provider type
//! - [`Provider`] - one configured instance, with readiness caches
//! - [`Urls`] / [`HasUrls`] - optional URL metadata

pub mod class;
pub mod instance;
pub mod urls;

use indexmap::IndexMap;

pub use class::{
    Attribute, InitFn, ProviderClass, ServiceFn, CONTRACT_TYPE_NAME, PATH_SEPARATOR,
};
pub use instance::{Provider, USABLE_ATTRIBUTE};
pub use urls::{HasUrls, Urls};

/// String-keyed configuration or keyword-argument mapping.
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

/// Provider collection keyed by lower-cased provider name, in insertion order.
pub type ProviderMap = IndexMap<String, Provider>;

//! Alphabet providers for Asia.

pub mod china;
pub mod japan;

use crate::providers::base;
use crate::registry::TypeRegistry;

pub fn register(registry: &mut TypeRegistry) {
    for class in [japan::class(), china::class()] {
        let unit = class.module().to_string();
        registry.register(class);
        registry.import(unit, &base::class().qualified_name());
    }
}

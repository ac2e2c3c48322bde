//! Alphabet providers for Africa.

pub mod arabic;
pub mod swahili;

use crate::providers::base;
use crate::registry::TypeRegistry;

pub fn register(registry: &mut TypeRegistry) {
    for class in [arabic::class(), swahili::class()] {
        let unit = class.module().to_string();
        registry.register(class);
        registry.import(unit, &base::class().qualified_name());
    }
}

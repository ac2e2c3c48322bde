//! Alphabet providers for Europe.

pub mod france;
pub mod spain;

use crate::providers::base;
use crate::registry::TypeRegistry;

pub fn register(registry: &mut TypeRegistry) {
    for class in [france::class(), spain::class()] {
        let unit = class.module().to_string();
        registry.register(class);
        registry.import(unit, &base::class().qualified_name());
    }
}

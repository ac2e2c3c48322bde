//! Service costs.
//!
//! A provider prices a service `s` with a `cost_s` attribute, or with a
//! `calculate_cost_s` method when the price depends on the arguments.
//! A cost of `0` or `"free"` is reported as `"free"`.

use indexmap::IndexMap;
use serde_json::Value;

use crate::provider::{Attribute, ConfigMap, Provider};

pub trait Costs {
    /// Whether `cost_{service}` is defined.
    fn is_cost_implemented(&self, service: &str) -> bool;

    /// Static cost of `service`, if defined.
    fn cost(&self, service: &str) -> Option<Value>;

    /// Call `calculate_cost_{service}` with `args`.
    ///
    /// Returns `None` if the provider has no such method.
    fn calculate_cost(&self, service: &str, args: &ConfigMap) -> Option<anyhow::Result<Value>>;

    /// Costs of all declared services that define one.
    fn costs(&self) -> IndexMap<String, Value>;
}

/// Map `0` and `"free"` to `"free"`; leave anything else alone.
pub fn normalize_cost(cost: Value) -> Value {
    let is_free = match &cost {
        Value::String(s) => s == "free",
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    };
    if is_free {
        Value::from("free")
    } else {
        cost
    }
}

impl Costs for Provider {
    fn is_cost_implemented(&self, service: &str) -> bool {
        self.attribute(&format!("cost_{}", service)).is_some()
    }

    fn cost(&self, service: &str) -> Option<Value> {
        match self.attribute(&format!("cost_{}", service))? {
            Attribute::Value(value) => Some(normalize_cost(value.clone())),
            Attribute::Method(f) => f(self, &ConfigMap::new()).ok().map(normalize_cost),
            Attribute::Type(_) => None,
        }
    }

    fn calculate_cost(&self, service: &str, args: &ConfigMap) -> Option<anyhow::Result<Value>> {
        self.call(&format!("calculate_cost_{}", service), args)
            .map(|result| result.map(normalize_cost))
    }

    fn costs(&self) -> IndexMap<String, Value> {
        self.class()
            .services()
            .iter()
            .filter_map(|service| self.cost(service).map(|cost| (service.clone(), cost)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderClass;
    use crate::readiness::Probe;
    use serde_json::json;
    use std::rc::Rc;

    fn priced() -> Provider {
        ProviderClass::new("SmsProvider", "app::sms")
            .with_name("sms")
            .with_services(["send", "status", "refund"])
            .with_attribute("cost_send", 0.05)
            .with_attribute("cost_status", 0)
            .with_method("calculate_cost_send", |_, args| {
                let count = args.get("count").and_then(Value::as_u64).unwrap_or(1);
                Ok(json!(count as f64 * 0.05))
            })
            .instantiate(Rc::new(Probe::empty()), None, &ConfigMap::new())
            .unwrap()
    }

    #[test]
    fn zero_and_free_normalize() {
        assert_eq!(normalize_cost(json!(0)), json!("free"));
        assert_eq!(normalize_cost(json!(0.0)), json!("free"));
        assert_eq!(normalize_cost(json!("free")), json!("free"));
        assert_eq!(normalize_cost(json!(1.5)), json!(1.5));
        assert_eq!(normalize_cost(json!("per request")), json!("per request"));
    }

    #[test]
    fn static_costs() {
        let p = priced();
        assert!(p.is_cost_implemented("send"));
        assert!(!p.is_cost_implemented("refund"));
        assert_eq!(p.cost("send"), Some(json!(0.05)));
        assert_eq!(p.cost("status"), Some(json!("free")));
        assert_eq!(p.cost("refund"), None);
    }

    #[test]
    fn costs_skip_unpriced_services() {
        let costs = priced().costs();
        assert_eq!(costs.len(), 2);
        assert_eq!(costs["status"], json!("free"));
        assert!(!costs.contains_key("refund"));
    }

    #[test]
    fn calculated_cost_uses_arguments() {
        let p = priced();
        let args = json!({"count": 4}).as_object().cloned().unwrap();
        let cost = p.calculate_cost("send", &args).unwrap().unwrap();
        assert_eq!(cost, json!(0.2));
        assert!(p.calculate_cost("status", &args).is_none());
    }
}

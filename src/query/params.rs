//! Parameter binder — resolves `$name` placeholders.

use crate::model::{PropertyMap, Value};
use crate::{Error, Result};

/// Look up a parameter by name and copy its value verbatim.
///
/// No coercion happens here: whatever shape the caller put in the parameter
/// mapping is what lands in the entity's property map.
pub fn bind(name: &str, params: &PropertyMap) -> Result<Value> {
    params
        .get(name)
        .cloned()
        .ok_or_else(|| Error::ParameterBinding(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_present() {
        let mut params = PropertyMap::new();
        params.insert("email".into(), Value::from("john@example.com"));
        assert_eq!(bind("email", &params).unwrap(), Value::from("john@example.com"));
    }

    #[test]
    fn test_bind_missing() {
        let params = PropertyMap::new();
        match bind("email", &params) {
            Err(Error::ParameterBinding(name)) => assert_eq!(name, "email"),
            other => panic!("expected ParameterBinding error, got {other:?}"),
        }
    }

    #[test]
    fn test_bind_falsy_values_are_still_bound() {
        let mut params = PropertyMap::new();
        params.insert("isVerified".into(), Value::Bool(false));
        params.insert("count".into(), Value::Int(0));
        assert_eq!(bind("isVerified", &params).unwrap(), Value::Bool(false));
        assert_eq!(bind("count", &params).unwrap(), Value::Int(0));
    }
}

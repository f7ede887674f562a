//! Structural merge of definition values
//!
//! Objects are merged key by key with `new` taking precedence. Anything that is
//! not an object (arrays included) replaces the old value wholesale. With
//! [`MergeOptions::delete_null_props`] a `null` in the result removes the key,
//! which is how the design service asks for a property to be deleted.

use serde_json::{Map, Value};

/// Options controlling [`merge`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Drop keys whose merged value is `null`
    pub delete_null_props: bool,
}

impl MergeOptions {
    /// Options with null deletion enabled
    pub fn deleting_nulls() -> Self {
        Self {
            delete_null_props: true,
        }
    }
}

/// Merge `new` onto `old` without modifying either.
///
/// A non-object `old` is treated as an empty object when `new` is an object.
/// Keys keep their order: those of `old` first, then the ones only `new` has.
pub fn merge(old: &Value, new: &Value, options: MergeOptions) -> Value {
    let Value::Object(new_map) = new else {
        return new.clone();
    };

    let empty = Map::new();
    let old_map = old.as_object().unwrap_or(&empty);

    let mut merged = Map::new();
    for (key, old_val) in old_map {
        let value = match new_map.get(key) {
            Some(new_val) => merge(old_val, new_val, options),
            None => old_val.clone(),
        };
        insert(&mut merged, key, value, options);
    }
    for (key, new_val) in new_map {
        if old_map.contains_key(key) {
            continue;
        }
        let value = match new_val {
            Value::Object(_) => merge(&Value::Null, new_val, options),
            other => other.clone(),
        };
        insert(&mut merged, key, value, options);
    }

    Value::Object(merged)
}

fn insert(map: &mut Map<String, Value>, key: &str, value: Value, options: MergeOptions) {
    if options.delete_null_props && value.is_null() {
        return;
    }
    map.insert(key.to_string(), value);
}

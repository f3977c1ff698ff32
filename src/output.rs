//! JSON export of runtime values.
//!
//! Used by `monkey run --json` to hand results to other tools. Conversion is
//! total: values without a JSON counterpart (functions, builtins) are exported
//! as their rendered text, and errors as an object with an `error` field.
//!
//! # Examples
//!
//! ```
//! use monkey_lang::Value;
//! use monkey_lang::output::{to_json, to_json_string};
//!
//! let value = Value::array(vec![Value::Integer(1), Value::from(true)]);
//! assert_eq!(to_json(&value), serde_json::json!([1, true]));
//! assert_eq!(to_json_string(&value, false).unwrap(), "[1,true]");
//! ```

use serde_json::{Map, Value as Json};

use crate::value::Value;

/// Convert a runtime value to a `serde_json::Value`.
///
/// Hash keys become object keys through their rendered text, so `1` and
/// `"1"` land on the same JSON key; the last one in key order wins.
pub fn to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Boolean(b) => Json::Bool(*b),
        Value::Integer(n) => Json::Number((*n).into()),
        Value::String(s) => Json::String(s.clone()),
        Value::Array(elements) => Json::Array(elements.iter().map(to_json).collect()),
        Value::Hash(pairs) => {
            let mut entries: Vec<_> = pairs.iter().collect();
            entries.sort_by_key(|(key, _)| **key);
            let object: Map<String, Json> = entries
                .into_iter()
                .map(|(_, pair)| (pair.key.to_string(), to_json(&pair.value)))
                .collect();
            Json::Object(object)
        }
        Value::Function(_) | Value::Builtin(_) => Json::String(value.to_string()),
        Value::ReturnValue(inner) => to_json(inner),
        Value::Error(error) => {
            let mut object = Map::new();
            object.insert("error".to_string(), Json::String(error.to_string()));
            Json::Object(object)
        }
    }
}

/// Serialize a runtime value as JSON text, compact or with 2-space
/// indentation.
pub fn to_json_string(value: &Value, pretty: bool) -> Result<String, serde_json::Error> {
    let json = to_json(value);
    if pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    }
}

//! Runtime type tagging and deep cloning for dynamic values.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;

/// Closed set of runtime type tags.
///
/// The tag is derived from the value's runtime category, never from
/// duck-typed field inspection: arrays and plain objects are distinct, as
/// are `Null` (an explicit null value) and `Undefined` (no value at all).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Object,
    Array,
    Number,
    Bool,
    Null,
    Undefined,
    Regexp,
    Date,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::Number => "number",
            ValueKind::Bool => "bool",
            ValueKind::Null => "null",
            ValueKind::Undefined => "undefined",
            ValueKind::Regexp => "regexp",
            ValueKind::Date => "date",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values that carry a runtime type tag.
pub trait TypeTag {
    fn type_tag(&self) -> ValueKind;
}

impl TypeTag for Value {
    fn type_tag(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

/// `None` is the absent value, distinct from an explicit null.
impl<T: TypeTag> TypeTag for Option<T> {
    fn type_tag(&self) -> ValueKind {
        match self {
            Some(value) => value.type_tag(),
            None => ValueKind::Undefined,
        }
    }
}

impl TypeTag for Regex {
    fn type_tag(&self) -> ValueKind {
        ValueKind::Regexp
    }
}

impl<Tz: TimeZone> TypeTag for DateTime<Tz> {
    fn type_tag(&self) -> ValueKind {
        ValueKind::Date
    }
}

impl TypeTag for NaiveDateTime {
    fn type_tag(&self) -> ValueKind {
        ValueKind::Date
    }
}

/// Returns the runtime type tag of `value`. Pure, no side effects.
pub fn classify<T: TypeTag>(value: &T) -> ValueKind {
    value.type_tag()
}

/// Returns a structurally-equal, reference-independent copy of `value` by
/// round-tripping it through the JSON data model.
///
/// The JSON model cannot express cyclic references, so the copy is
/// cycle-safe by construction. Data that does not fit the model fails with
/// an explicit serialization error instead of being silently carried over.
pub fn deep_clone<T>(value: &T) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let encoded = serde_json::to_value(value)?;
    Ok(serde_json::from_value(encoded)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn given_json_values_when_classifying_then_returns_runtime_tag() {
        assert_eq!(classify(&json!("")), ValueKind::String);
        assert_eq!(classify(&json!({})), ValueKind::Object);
        assert_eq!(classify(&json!([])), ValueKind::Array);
        assert_eq!(classify(&json!(100)), ValueKind::Number);
        assert_eq!(classify(&json!(true)), ValueKind::Bool);
        assert_eq!(classify(&json!(null)), ValueKind::Null);
    }

    #[test]
    fn given_absent_value_when_classifying_then_returns_undefined() {
        assert_eq!(classify(&None::<Value>), ValueKind::Undefined);
        assert_eq!(classify(&Some(json!(1))), ValueKind::Number);
    }

    #[test]
    fn given_host_objects_when_classifying_then_returns_regexp_and_date() {
        let pattern = Regex::new("abcd").unwrap();
        assert_eq!(classify(&pattern), ValueKind::Regexp);
        assert_eq!(classify(&Utc::now()), ValueKind::Date);
    }

    #[test]
    fn given_tag_when_displaying_then_yields_lowercase_name() {
        assert_eq!(ValueKind::Array.to_string(), "array");
        assert_eq!(ValueKind::Undefined.as_str(), "undefined");
    }

    #[test]
    fn given_nested_object_when_deep_cloning_then_copy_is_equal_and_independent() {
        let original = json!({"id": 1, "tags": ["a", "b"], "meta": {"depth": 2}});
        let mut copy: Value = deep_clone(&original).unwrap();
        assert_eq!(copy, original);

        copy["meta"]["depth"] = json!(99);
        copy["tags"][0] = json!("mutated");
        assert_eq!(original["meta"]["depth"], json!(2));
        assert_eq!(original["tags"][0], json!("a"));
    }

    #[test]
    fn given_scalar_when_deep_cloning_then_returns_same_value() {
        let copied: i64 = deep_clone(&42i64).unwrap();
        assert_eq!(copied, 42);
    }
}

//! Typed port values.
//!
//! Every port declares a [`ValueType`]; the values travelling along
//! connections are [`Value`]s tagged with one of those types. Rust types that
//! can sit on a port implement [`PortValue`], which is how cells read and
//! write ports without touching the dynamic representation.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

/// Declared semantic type of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Accepts any value; compatible with every other type.
    Any,
    /// 64-bit float.
    Double,
    /// 64-bit signed integer.
    Int,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    String,
    /// Arbitrary JSON document.
    Json,
}

impl ValueType {
    /// Whether an output of type `other` may feed an input of this type.
    ///
    /// Types must match exactly unless this input is [`ValueType::Any`].
    /// An [`ValueType::Any`] output only feeds [`ValueType::Any`] inputs.
    #[must_use]
    pub fn is_compatible(self, other: ValueType) -> bool {
        self == other || self == Self::Any
    }

    /// Lower-case type name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Double => "double",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "double" | "float" | "f64" => Ok(Self::Double),
            "int" | "integer" | "i64" => Ok(Self::Int),
            "bool" | "boolean" => Ok(Self::Bool),
            "string" | "str" => Ok(Self::String),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown value type '{}'", other)),
        }
    }
}

/// A value held by a port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// 64-bit float.
    Double(f64),
    /// 64-bit signed integer.
    Int(i64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    String(String),
    /// Arbitrary JSON document.
    Json(JsonValue),
}

impl Value {
    /// The concrete type of this value (never [`ValueType::Any`]).
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Double(_) => ValueType::Double,
            Self::Int(_) => ValueType::Int,
            Self::Bool(_) => ValueType::Bool,
            Self::String(_) => ValueType::String,
            Self::Json(_) => ValueType::Json,
        }
    }

    /// Numeric view of the value, if it has one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::Json(v) => v.as_f64(),
            _ => None,
        }
    }

    /// String view of the value, if it is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Json(JsonValue::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Double(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::String(v) => f.write_str(v),
            Self::Json(v) => write!(f, "{}", v),
        }
    }
}

/// A Rust type that can be stored on a port.
pub trait PortValue: Sized {
    /// The port type this Rust type maps to.
    const TYPE: ValueType;

    /// Extract from a port value, `None` if the variant does not match.
    fn from_value(value: &Value) -> Option<Self>;

    /// Wrap into a port value.
    fn into_value(self) -> Value;
}

impl PortValue for f64 {
    const TYPE: ValueType = ValueType::Double;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Double(self)
    }
}

impl PortValue for i64 {
    const TYPE: ValueType = ValueType::Int;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl PortValue for bool {
    const TYPE: ValueType = ValueType::Bool;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl PortValue for String {
    const TYPE: ValueType = ValueType::String;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl PortValue for JsonValue {
    const TYPE: ValueType = ValueType::Json;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Json(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Json(self)
    }
}

impl PortValue for Value {
    const TYPE: ValueType = ValueType::Any;

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn into_value(self) -> Value {
        self
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<JsonValue> for Value {
    fn from(v: JsonValue) -> Self {
        Self::Json(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compatibility_is_exact_or_any_input() {
        assert!(ValueType::Double.is_compatible(ValueType::Double));
        assert!(ValueType::Any.is_compatible(ValueType::String));
        assert!(ValueType::Any.is_compatible(ValueType::Any));
        assert!(!ValueType::Int.is_compatible(ValueType::Any));
        assert!(!ValueType::Json.is_compatible(ValueType::Any));
        assert!(!ValueType::Int.is_compatible(ValueType::Double));
        assert!(!ValueType::String.is_compatible(ValueType::Bool));
    }

    #[test]
    fn port_value_extraction_checks_variant() {
        assert_eq!(f64::from_value(&Value::Double(2.5)), Some(2.5));
        assert_eq!(f64::from_value(&Value::Int(2)), None);
        assert_eq!(
            String::from_value(&Value::from("hi")),
            Some("hi".to_string())
        );
        assert_eq!(Value::from_value(&Value::Int(9)), Some(Value::Int(9)));
    }

    #[test]
    fn type_names_parse() {
        assert_eq!("double".parse::<ValueType>(), Ok(ValueType::Double));
        assert_eq!("INT".parse::<ValueType>(), Ok(ValueType::Int));
        assert!("pointer".parse::<ValueType>().is_err());
        assert_eq!(ValueType::Json.to_string(), "json");
    }

    #[test]
    fn display_and_json_views() {
        assert_eq!(Value::Double(6.0).to_string(), "6");
        assert_eq!(Value::from("EXIT").to_string(), "EXIT");
        assert_eq!(Value::Json(json!({"a": 1})).to_string(), r#"{"a":1}"#);
        assert_eq!(Value::Int(4).as_f64(), Some(4.0));
    }
}

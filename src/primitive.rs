//! Leaf schemas for atomic values that are their own representation.
//!
//! All primitives use identity encode/decode; `validate` is a tag check
//! against the corresponding [`Value`] variant. `any` accepts everything,
//! `literal` narrows to exact equality with one fixed value.

use crate::contract::{contract_violation, Schema};
use crate::value::Value;

/// Schema for booleans. See [`boolean`].
#[derive(Debug, Clone, Copy)]
pub struct Boolean;

/// Schema for 64-bit float numbers. See [`number`].
#[derive(Debug, Clone, Copy)]
pub struct Number;

/// Schema for strings. See [`string`].
#[derive(Debug, Clone, Copy)]
pub struct Text;

/// Schema for the null value. See [`null`].
#[derive(Debug, Clone, Copy)]
pub struct Null;

/// Schema for the absent value. See [`undefined`].
#[derive(Debug, Clone, Copy)]
pub struct Undefined;

/// Schema accepting any wire value unchanged. See [`any`].
#[derive(Debug, Clone, Copy)]
pub struct Any;

/// Schema accepting exactly one wire value. See [`literal`].
#[derive(Debug, Clone)]
pub struct Literal {
    value: Value,
}

/// A schema whose domain is `bool`.
pub fn boolean() -> Boolean {
    Boolean
}

/// A schema whose domain is `f64`.
pub fn number() -> Number {
    Number
}

/// A schema whose domain is `String`.
pub fn string() -> Text {
    Text
}

/// A schema for `Value::Null`, with unit domain.
pub fn null() -> Null {
    Null
}

/// A schema for `Value::Undefined`, with unit domain.
pub fn undefined() -> Undefined {
    Undefined
}

/// A schema that passes any wire value through unchanged.
pub fn any() -> Any {
    Any
}

/// A schema that accepts exactly `value` and nothing else.
///
/// Encode and decode are still identity over the wire value; only
/// validation narrows.
pub fn literal(value: impl Into<Value>) -> Literal {
    Literal { value: value.into() }
}

impl Schema for Boolean {
    type Domain = bool;

    fn encode(&self, value: &bool) -> Value {
        Value::Bool(*value)
    }

    fn decode(&self, repr: &Value) -> bool {
        match repr.as_bool() {
            Some(b) => b,
            None => contract_violation("expected bool", repr),
        }
    }

    fn validate(&self, repr: &Value) -> bool {
        matches!(repr, Value::Bool(_))
    }
}

impl Schema for Number {
    type Domain = f64;

    fn encode(&self, value: &f64) -> Value {
        Value::Number(*value)
    }

    fn decode(&self, repr: &Value) -> f64 {
        match repr.as_number() {
            Some(n) => n,
            None => contract_violation("expected number", repr),
        }
    }

    fn validate(&self, repr: &Value) -> bool {
        matches!(repr, Value::Number(_))
    }
}

impl Schema for Text {
    type Domain = String;

    fn encode(&self, value: &String) -> Value {
        Value::String(value.clone())
    }

    fn decode(&self, repr: &Value) -> String {
        match repr.as_str() {
            Some(s) => s.to_string(),
            None => contract_violation("expected string", repr),
        }
    }

    fn validate(&self, repr: &Value) -> bool {
        matches!(repr, Value::String(_))
    }
}

impl Schema for Null {
    type Domain = ();

    fn encode(&self, _value: &()) -> Value {
        Value::Null
    }

    fn decode(&self, repr: &Value) {
        if !matches!(repr, Value::Null) {
            contract_violation("expected null", repr);
        }
    }

    fn validate(&self, repr: &Value) -> bool {
        matches!(repr, Value::Null)
    }
}

impl Schema for Undefined {
    type Domain = ();

    fn encode(&self, _value: &()) -> Value {
        Value::Undefined
    }

    fn decode(&self, repr: &Value) {
        if !matches!(repr, Value::Undefined) {
            contract_violation("expected undefined", repr);
        }
    }

    fn validate(&self, repr: &Value) -> bool {
        matches!(repr, Value::Undefined)
    }
}

impl Schema for Any {
    type Domain = Value;

    fn encode(&self, value: &Value) -> Value {
        value.clone()
    }

    fn decode(&self, repr: &Value) -> Value {
        repr.clone()
    }

    fn validate(&self, _repr: &Value) -> bool {
        true
    }
}

impl Schema for Literal {
    type Domain = Value;

    fn encode(&self, value: &Value) -> Value {
        value.clone()
    }

    fn decode(&self, repr: &Value) -> Value {
        if !self.validate(repr) {
            contract_violation("expected the literal value", repr);
        }
        repr.clone()
    }

    fn validate(&self, repr: &Value) -> bool {
        *repr == self.value
    }
}

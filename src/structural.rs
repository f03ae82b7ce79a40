//! Aggregate combinators: sequences, tuples, records, and associative
//! containers built element-wise from smaller schemas.
//!
//! Validation policy:
//! - Arrays validate element-wise; tuples additionally require exact arity
//! - Records validate only their declared fields; undeclared keys pass
//!   (open-world validation, intentional; see `record_of`)
//! - A missing record key validates as `Undefined`, which is what lets
//!   `optional` fields be entirely absent

use std::collections::BTreeMap;

use crate::contract::{contract_violation, Schema};
use crate::transform::{contra, Contra};
use crate::value::Value;

static ABSENT: Value = Value::Undefined;

/// Homogeneous sequence schema. See [`array_of`].
#[derive(Debug, Clone)]
pub struct ArrayOf<S> {
    elem: S,
}

/// Homogeneous sequence schema requiring at least one element.
/// See [`non_empty_array_of`].
#[derive(Debug, Clone)]
pub struct NonEmptyArrayOf<S> {
    inner: ArrayOf<S>,
}

/// Positional heterogeneous sequence schema. See [`tuple_of`].
#[derive(Debug, Clone)]
pub struct TupleOf<T> {
    schemas: T,
}

/// Homogeneous string-keyed container schema. See [`object_of`].
#[derive(Debug, Clone)]
pub struct ObjectOf<S> {
    value: S,
}

/// A named field for [`record_of`].
#[derive(Debug, Clone)]
pub struct Field<S> {
    name: &'static str,
    schema: S,
}

/// Fixed-shape record schema. See [`record_of`].
#[derive(Debug, Clone)]
pub struct RecordOf<F> {
    fields: F,
}

/// Associative-pair schema. See [`map_of`].
#[derive(Debug, Clone)]
pub struct MapOf<K, V> {
    key: K,
    value: V,
}

/// A schema for `Vec<T>` represented as an array, validated element-wise.
pub fn array_of<S: Schema>(elem: S) -> ArrayOf<S> {
    ArrayOf { elem }
}

/// As [`array_of`], plus a minimum-length-1 check on validation.
pub fn non_empty_array_of<S: Schema>(elem: S) -> NonEmptyArrayOf<S> {
    NonEmptyArrayOf { inner: array_of(elem) }
}

/// A schema for a fixed-arity heterogeneous sequence.
///
/// Takes a tuple of schemas (arities 1 through 8); the domain is the tuple
/// of their domains. Validation requires an array of exactly matching
/// length where every position validates against its schema.
pub fn tuple_of<T>(schemas: T) -> TupleOf<T>
where
    TupleOf<T>: Schema,
{
    TupleOf { schemas }
}

/// A schema for a string-keyed container whose values all share one schema.
///
/// Keys are untyped pass-through strings; the domain is
/// `BTreeMap<String, T>`.
pub fn object_of<S: Schema>(value: S) -> ObjectOf<S> {
    ObjectOf { value }
}

/// Declares one named field of a [`record_of`] schema.
pub fn field<S: Schema>(name: &'static str, schema: S) -> Field<S> {
    Field { name, schema }
}

/// A schema for a record with a fixed, statically known set of named
/// fields.
///
/// Takes a tuple of [`field`] entries (arities 1 through 8); the domain is
/// the tuple of field domains, in declaration order.
///
/// Validation is open-world: only declared fields are checked and extra
/// keys are ignored. This is intentional, not an oversight: persisted
/// data from a richer producer must stay loadable. A missing key is
/// treated as `Undefined`, so wrapping a field schema in
/// [`optional`](crate::union::optional) permits full absence. Encoding
/// omits any field whose value encodes to `Undefined`, keeping the two
/// directions symmetric.
pub fn record_of<F>(fields: F) -> RecordOf<F>
where
    RecordOf<F>: Schema,
{
    RecordOf { fields }
}

/// A schema for an associative container with arbitrarily typed keys.
///
/// Distinct from [`object_of`]: keys may be of any encodable type, and key
/// distinctness follows the key domain's own equality rather than string
/// coercion. The representation is an ordered array of `[key, value]`
/// pairs. The domain is `Vec<(K, V)>`; decoding folds the pair sequence
/// with duplicate keys resolving last-write-wins, so a decoded container
/// never holds the same key twice.
pub fn map_of<K, V>(key: K, value: V) -> MapOf<K, V>
where
    K: Schema,
    V: Schema,
    K::Domain: PartialEq,
{
    MapOf { key, value }
}

/// A schema reconstructing a domain type through a custom constructor.
///
/// Exactly [`record_of`] followed by [`contra`]: `project` flattens the
/// domain value into the field tuple for encoding, and `construct`
/// rebuilds it (typically a struct or class-like type) after decoding.
pub fn class_of<F, T, P, C>(fields: F, project: P, construct: C) -> Contra<RecordOf<F>, P, C>
where
    RecordOf<F>: Schema,
    P: Fn(&T) -> <RecordOf<F> as Schema>::Domain,
    C: Fn(<RecordOf<F> as Schema>::Domain) -> T,
{
    contra(record_of(fields), project, construct)
}

impl<S: Schema> Schema for ArrayOf<S> {
    type Domain = Vec<S::Domain>;

    fn encode(&self, value: &Self::Domain) -> Value {
        Value::Array(value.iter().map(|item| self.elem.encode(item)).collect())
    }

    fn decode(&self, repr: &Value) -> Self::Domain {
        match repr.as_array() {
            Some(items) => items.iter().map(|item| self.elem.decode(item)).collect(),
            None => contract_violation("expected array", repr),
        }
    }

    fn validate(&self, repr: &Value) -> bool {
        match repr.as_array() {
            Some(items) => items.iter().all(|item| self.elem.validate(item)),
            None => false,
        }
    }
}

impl<S: Schema> Schema for NonEmptyArrayOf<S> {
    type Domain = Vec<S::Domain>;

    fn encode(&self, value: &Self::Domain) -> Value {
        self.inner.encode(value)
    }

    fn decode(&self, repr: &Value) -> Self::Domain {
        self.inner.decode(repr)
    }

    fn validate(&self, repr: &Value) -> bool {
        repr.as_array().is_some_and(|items| !items.is_empty()) && self.inner.validate(repr)
    }
}

macro_rules! impl_tuple_of {
    ($len:literal; $($S:ident . $idx:tt),+) => {
        impl<$($S: Schema),+> Schema for TupleOf<($($S,)+)> {
            type Domain = ($($S::Domain,)+);

            fn encode(&self, value: &Self::Domain) -> Value {
                Value::Array(vec![$(self.schemas.$idx.encode(&value.$idx)),+])
            }

            fn decode(&self, repr: &Value) -> Self::Domain {
                match repr.as_array() {
                    Some(items) if items.len() == $len => {
                        ($(self.schemas.$idx.decode(&items[$idx]),)+)
                    }
                    _ => contract_violation(
                        concat!("expected array of length ", $len),
                        repr,
                    ),
                }
            }

            fn validate(&self, repr: &Value) -> bool {
                match repr.as_array() {
                    Some(items) if items.len() == $len => {
                        true $(&& self.schemas.$idx.validate(&items[$idx]))+
                    }
                    _ => false,
                }
            }
        }
    };
}

impl_tuple_of!(1; S0.0);
impl_tuple_of!(2; S0.0, S1.1);
impl_tuple_of!(3; S0.0, S1.1, S2.2);
impl_tuple_of!(4; S0.0, S1.1, S2.2, S3.3);
impl_tuple_of!(5; S0.0, S1.1, S2.2, S3.3, S4.4);
impl_tuple_of!(6; S0.0, S1.1, S2.2, S3.3, S4.4, S5.5);
impl_tuple_of!(7; S0.0, S1.1, S2.2, S3.3, S4.4, S5.5, S6.6);
impl_tuple_of!(8; S0.0, S1.1, S2.2, S3.3, S4.4, S5.5, S6.6, S7.7);

impl<S: Schema> Schema for ObjectOf<S> {
    type Domain = BTreeMap<String, S::Domain>;

    fn encode(&self, value: &Self::Domain) -> Value {
        Value::Record(
            value
                .iter()
                .map(|(key, item)| (key.clone(), self.value.encode(item)))
                .collect(),
        )
    }

    fn decode(&self, repr: &Value) -> Self::Domain {
        match repr.as_record() {
            Some(fields) => fields
                .iter()
                .map(|(key, item)| (key.clone(), self.value.decode(item)))
                .collect(),
            None => contract_violation("expected record", repr),
        }
    }

    fn validate(&self, repr: &Value) -> bool {
        match repr.as_record() {
            Some(fields) => fields.values().all(|item| self.value.validate(item)),
            None => false,
        }
    }
}

macro_rules! impl_record_of {
    ($($S:ident . $idx:tt),+) => {
        impl<$($S: Schema),+> Schema for RecordOf<($(Field<$S>,)+)> {
            type Domain = ($($S::Domain,)+);

            fn encode(&self, value: &Self::Domain) -> Value {
                let mut out = BTreeMap::new();
                $(
                    let encoded = self.fields.$idx.schema.encode(&value.$idx);
                    if !matches!(encoded, Value::Undefined) {
                        out.insert(self.fields.$idx.name.to_string(), encoded);
                    }
                )+
                Value::Record(out)
            }

            fn decode(&self, repr: &Value) -> Self::Domain {
                if repr.as_record().is_none() {
                    contract_violation("expected record", repr);
                }
                ($(
                    self.fields.$idx.schema.decode(
                        repr.field(self.fields.$idx.name).unwrap_or(&ABSENT),
                    ),
                )+)
            }

            fn validate(&self, repr: &Value) -> bool {
                if repr.as_record().is_none() {
                    return false;
                }
                true $(&& self.fields.$idx.schema.validate(
                    repr.field(self.fields.$idx.name).unwrap_or(&ABSENT),
                ))+
            }
        }
    };
}

impl_record_of!(S0.0);
impl_record_of!(S0.0, S1.1);
impl_record_of!(S0.0, S1.1, S2.2);
impl_record_of!(S0.0, S1.1, S2.2, S3.3);
impl_record_of!(S0.0, S1.1, S2.2, S3.3, S4.4);
impl_record_of!(S0.0, S1.1, S2.2, S3.3, S4.4, S5.5);
impl_record_of!(S0.0, S1.1, S2.2, S3.3, S4.4, S5.5, S6.6);
impl_record_of!(S0.0, S1.1, S2.2, S3.3, S4.4, S5.5, S6.6, S7.7);

impl<K, V> Schema for MapOf<K, V>
where
    K: Schema,
    V: Schema,
    K::Domain: PartialEq,
{
    type Domain = Vec<(K::Domain, V::Domain)>;

    fn encode(&self, value: &Self::Domain) -> Value {
        Value::Array(
            value
                .iter()
                .map(|(k, v)| Value::Array(vec![self.key.encode(k), self.value.encode(v)]))
                .collect(),
        )
    }

    fn decode(&self, repr: &Value) -> Self::Domain {
        let items = match repr.as_array() {
            Some(items) => items,
            None => contract_violation("expected array of pairs", repr),
        };
        let mut out: Self::Domain = Vec::with_capacity(items.len());
        for item in items {
            let pair = match item.as_array() {
                Some(pair) if pair.len() == 2 => pair,
                _ => contract_violation("expected [key, value] pair", item),
            };
            let k = self.key.decode(&pair[0]);
            let v = self.value.decode(&pair[1]);
            // Duplicate keys resolve last-write-wins.
            match out.iter_mut().find(|(existing, _)| *existing == k) {
                Some(slot) => slot.1 = v,
                None => out.push((k, v)),
            }
        }
        out
    }

    fn validate(&self, repr: &Value) -> bool {
        match repr.as_array() {
            Some(items) => items.iter().all(|item| match item.as_array() {
                Some(pair) if pair.len() == 2 => {
                    self.key.validate(&pair[0]) && self.value.validate(&pair[1])
                }
                _ => false,
            }),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{boolean, number, string};
    use crate::union::optional;
    use serde_json::json;

    fn wire(json: serde_json::Value) -> Value {
        Value::from_json(json)
    }

    #[test]
    fn test_array_round_trip() {
        let schema = array_of(number());
        let values = vec![1.0, 2.0, 3.0];
        let encoded = schema.encode(&values);
        assert!(schema.validate(&encoded));
        assert_eq!(schema.decode(&encoded), values);
    }

    #[test]
    fn test_array_rejects_bad_element() {
        let schema = array_of(number());
        assert!(schema.validate(&wire(json!([1, 2]))));
        assert!(!schema.validate(&wire(json!([1, "2"]))));
        assert!(!schema.validate(&wire(json!({"0": 1}))));
    }

    #[test]
    fn test_empty_array_validates() {
        assert!(array_of(number()).validate(&wire(json!([]))));
    }

    #[test]
    fn test_non_empty_array_requires_one_element() {
        let schema = non_empty_array_of(number());
        assert!(!schema.validate(&wire(json!([]))));
        assert!(schema.validate(&wire(json!([1]))));
    }

    #[test]
    fn test_tuple_arity_is_exact() {
        let schema = tuple_of((number(), string()));
        assert!(schema.validate(&wire(json!([1, "x"]))));
        assert!(!schema.validate(&wire(json!([1, "x", true]))));
        assert!(!schema.validate(&wire(json!([1]))));
        assert!(!schema.validate(&wire(json!([1, 2]))));
    }

    #[test]
    fn test_tuple_round_trip() {
        let schema = tuple_of((number(), string(), boolean()));
        let value = (1.5, "mid".to_string(), false);
        let encoded = schema.encode(&value);
        assert!(schema.validate(&encoded));
        assert_eq!(schema.decode(&encoded), value);
    }

    #[test]
    fn test_object_passes_keys_through() {
        let schema = object_of(number());
        let mut value = BTreeMap::new();
        value.insert("a".to_string(), 1.0);
        value.insert("b".to_string(), 2.0);
        let encoded = schema.encode(&value);
        assert!(schema.validate(&encoded));
        assert_eq!(schema.decode(&encoded), value);
        assert!(!schema.validate(&wire(json!({"a": "1"}))));
    }

    #[test]
    fn test_record_round_trip() {
        let schema = record_of((field("x", number()), field("label", string())));
        let value = (3.0, "axis".to_string());
        let encoded = schema.encode(&value);
        assert!(schema.validate(&encoded));
        assert_eq!(schema.decode(&encoded), value);
    }

    #[test]
    fn test_record_validation_is_open_world() {
        let schema = record_of((field("x", number()),));
        assert!(schema.validate(&wire(json!({"x": 1, "extra": "ignored"}))));
        assert!(!schema.validate(&wire(json!({"x": "1"}))));
        assert!(!schema.validate(&wire(json!({}))));
        assert!(!schema.validate(&wire(json!([]))));
    }

    #[test]
    fn test_record_optional_field_may_be_absent() {
        let schema = record_of((field("x", optional(number())),));
        assert!(schema.validate(&wire(json!({}))));
        assert!(schema.validate(&wire(json!({"x": 1}))));
        assert!(!schema.validate(&wire(json!({"x": "s"}))));
        assert_eq!(schema.decode(&wire(json!({}))), (None,));
    }

    #[test]
    fn test_record_omits_undefined_fields_on_encode() {
        let schema = record_of((field("x", optional(number())),));
        let encoded = schema.encode(&(None,));
        assert_eq!(encoded, Value::record::<&str, _>([]));
    }

    #[test]
    fn test_map_round_trip() {
        let schema = map_of(number(), string());
        let value = vec![(1.0, "one".to_string()), (2.0, "two".to_string())];
        let encoded = schema.encode(&value);
        assert_eq!(encoded, wire(json!([[1, "one"], [2, "two"]])));
        assert!(schema.validate(&encoded));
        assert_eq!(schema.decode(&encoded), value);
    }

    #[test]
    fn test_map_duplicate_keys_last_write_wins() {
        let schema = map_of(number(), string());
        let decoded = schema.decode(&wire(json!([[1, "a"], [1, "b"]])));
        assert_eq!(decoded, vec![(1.0, "b".to_string())]);
    }

    #[test]
    fn test_map_rejects_malformed_pairs() {
        let schema = map_of(number(), string());
        assert!(!schema.validate(&wire(json!([[1, "a", "extra"]]))));
        assert!(!schema.validate(&wire(json!([[1]]))));
        assert!(!schema.validate(&wire(json!([["k", "v"]]))));
        assert!(!schema.validate(&wire(json!({"1": "a"}))));
    }

    #[test]
    fn test_class_of_reconstructs_struct() {
        #[derive(Debug, Clone, PartialEq)]
        struct Point {
            x: f64,
            y: f64,
        }

        let schema = class_of(
            (field("x", number()), field("y", number())),
            |p: &Point| (p.x, p.y),
            |(x, y)| Point { x, y },
        );

        let point = Point { x: 1.0, y: -2.0 };
        let encoded = schema.encode(&point);
        assert_eq!(encoded, wire(json!({"x": 1.0, "y": -2.0})));
        assert!(schema.validate(&encoded));
        assert_eq!(schema.decode(&encoded), point);
    }

    #[test]
    #[should_panic(expected = "contract violation")]
    fn test_tuple_decode_wrong_arity_is_fatal() {
        tuple_of((number(), string())).decode(&wire(json!([1])));
    }
}

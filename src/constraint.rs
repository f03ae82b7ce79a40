//! Constraint and enumeration combinators: narrow what an existing schema
//! accepts, or serialize a value by its place in a fixed reference set.
//!
//! Reference-set caveats, documented rather than mitigated:
//! - [`indexing`] persists a position; reordering the reference list in a
//!   later version silently changes the meaning of stored data
//! - [`mapping`] persists a key; renaming an entry orphans stored data
//! - Encoding a value absent from the reference set is a contract
//!   violation and aborts

use regex::Regex;

use crate::contract::{contract_violation, Schema};
use crate::value::Value;

/// Predicate-narrowed schema. See [`constrain`] and [`asserting`].
#[derive(Debug, Clone)]
pub struct Constrain<S, P> {
    inner: S,
    predicate: P,
}

/// Pattern-constrained string schema. See [`matching`].
#[derive(Debug, Clone)]
pub struct Matching {
    regex: Regex,
}

/// Position-keyed enumeration schema. See [`indexing`].
#[derive(Debug, Clone)]
pub struct Indexing<T> {
    values: Vec<T>,
}

/// String-keyed enumeration schema. See [`mapping`].
#[derive(Debug, Clone)]
pub struct Mapping<T> {
    entries: Vec<(String, T)>,
}

/// Narrows a schema's validation with an extra predicate over the wire
/// value. Encode and decode pass through unchanged.
///
/// Use for invariants expressible post-hoc on the representation, e.g.
/// positivity or range checks.
pub fn constrain<S, P>(inner: S, predicate: P) -> Constrain<S, P>
where
    S: Schema,
    P: Fn(&Value) -> bool,
{
    Constrain { inner, predicate }
}

/// As [`constrain`], for predicates that refine the representation's
/// shape rather than constrain a single value (e.g. proving an `any`
/// subtree is a record of a known form). Mechanically identical; the
/// distinct name keeps the intent visible at use sites.
pub fn asserting<S, P>(inner: S, predicate: P) -> Constrain<S, P>
where
    S: Schema,
    P: Fn(&Value) -> bool,
{
    constrain(inner, predicate)
}

/// A string schema accepting only values the pattern matches in full.
///
/// The match must span the entire string; a substring match does not
/// validate. The caller's pattern is anchored at construction, so
/// alternations behave as expected: `a|aa` accepts both `"a"` and
/// `"aa"`, regardless of which alternative the engine prefers.
pub fn matching(regex: Regex) -> Matching {
    // Wrapping a valid pattern in a non-capturing group keeps it valid.
    let anchored = Regex::new(&format!("^(?:{})$", regex.as_str()))
        .expect("anchoring a compiled pattern preserves validity");
    Matching { regex: anchored }
}

/// A schema serializing a value as its position in a fixed reference list.
///
/// Encode performs an ordered linear search and aborts if the value is
/// absent; decode is a positional lookup; validate only checks that the
/// number is a whole index in range.
pub fn indexing<T: PartialEq + Clone>(values: Vec<T>) -> Indexing<T> {
    Indexing { values }
}

/// A schema serializing a value as its key in a fixed reference table.
///
/// Encode performs a linear search over the entries for an equal value
/// and aborts if none matches; decode is a direct key lookup; validate
/// checks key membership.
pub fn mapping<T, K, I>(entries: I) -> Mapping<T>
where
    T: PartialEq + Clone,
    K: Into<String>,
    I: IntoIterator<Item = (K, T)>,
{
    Mapping {
        entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
    }
}

impl<S, P> Schema for Constrain<S, P>
where
    S: Schema,
    P: Fn(&Value) -> bool,
{
    type Domain = S::Domain;

    fn encode(&self, value: &Self::Domain) -> Value {
        self.inner.encode(value)
    }

    fn decode(&self, repr: &Value) -> Self::Domain {
        self.inner.decode(repr)
    }

    fn validate(&self, repr: &Value) -> bool {
        self.inner.validate(repr) && (self.predicate)(repr)
    }
}

impl Schema for Matching {
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
        match repr.as_str() {
            Some(s) => self.regex.is_match(s),
            None => false,
        }
    }
}

impl<T: PartialEq + Clone> Schema for Indexing<T> {
    type Domain = T;

    fn encode(&self, value: &T) -> Value {
        match self.values.iter().position(|candidate| candidate == value) {
            Some(index) => Value::Number(index as f64),
            None => panic!(
                "schema contract violation: value absent from indexing reference list of {}",
                self.values.len()
            ),
        }
    }

    fn decode(&self, repr: &Value) -> T {
        let index = match repr.as_number() {
            Some(n) if n.fract() == 0.0 && n >= 0.0 => n as usize,
            _ => contract_violation("expected a whole non-negative index", repr),
        };
        match self.values.get(index) {
            Some(value) => value.clone(),
            None => contract_violation("index beyond the reference list", repr),
        }
    }

    fn validate(&self, repr: &Value) -> bool {
        match repr.as_number() {
            Some(n) => n.fract() == 0.0 && n >= 0.0 && (n as usize) < self.values.len(),
            None => false,
        }
    }
}

impl<T: PartialEq + Clone> Schema for Mapping<T> {
    type Domain = T;

    fn encode(&self, value: &T) -> Value {
        match self.entries.iter().find(|(_, candidate)| candidate == value) {
            Some((key, _)) => Value::String(key.clone()),
            None => panic!(
                "schema contract violation: value absent from mapping reference table of {}",
                self.entries.len()
            ),
        }
    }

    fn decode(&self, repr: &Value) -> T {
        let key = match repr.as_str() {
            Some(key) => key,
            None => contract_violation("expected string key", repr),
        };
        match self.entries.iter().find(|(k, _)| k == key) {
            Some((_, value)) => value.clone(),
            None => contract_violation("key absent from the reference table", repr),
        }
    }

    fn validate(&self, repr: &Value) -> bool {
        match repr.as_str() {
            Some(key) => self.entries.iter().any(|(k, _)| k == key),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{any, number};

    #[test]
    fn test_constrain_narrows_validation_only() {
        let positive = constrain(number(), |v| v.as_number().is_some_and(|n| n > 0.0));
        assert!(positive.validate(&Value::Number(1.0)));
        assert!(!positive.validate(&Value::Number(-1.0)));
        assert!(!positive.validate(&Value::from("1")));
        // Encode and decode are untouched.
        assert_eq!(positive.encode(&-1.0), Value::Number(-1.0));
        assert_eq!(positive.decode(&Value::Number(-1.0)), -1.0);
    }

    #[test]
    fn test_asserting_refines_shape() {
        let versioned = asserting(any(), |v| {
            v.field("version").is_some_and(|f| f.as_number().is_some())
        });
        assert!(versioned.validate(&Value::record([("version", Value::from(2))])));
        assert!(!versioned.validate(&Value::record([("other", Value::from(2))])));
        assert!(!versioned.validate(&Value::from(2)));
    }

    #[test]
    fn test_matching_requires_full_match() {
        let schema = matching(Regex::new(r"[a-z]+-\d+").unwrap());
        assert!(schema.validate(&Value::from("tile-12")));
        assert!(!schema.validate(&Value::from("tile-12!")));
        assert!(!schema.validate(&Value::from("!tile-12")));
        assert!(!schema.validate(&Value::Number(12.0)));
        assert_eq!(schema.decode(&Value::from("tile-12")), "tile-12");
    }

    #[test]
    fn test_matching_alternation_accepts_every_full_match() {
        // The engine prefers the first alternative, which only covers a
        // prefix of "aa"; anchoring must not let that reject the value.
        let schema = matching(Regex::new("a|aa").unwrap());
        let encoded = schema.encode(&"aa".to_string());
        assert!(schema.validate(&encoded));
        assert!(schema.validate(&Value::from("a")));
        assert!(!schema.validate(&Value::from("ab")));
        assert!(!schema.validate(&Value::from("aaa")));
    }

    #[test]
    fn test_indexing_round_trip() {
        let schema = indexing(vec!["spring", "summer", "autumn", "winter"]);
        let encoded = schema.encode(&"autumn");
        assert_eq!(encoded, Value::Number(2.0));
        assert!(schema.validate(&encoded));
        assert_eq!(schema.decode(&encoded), "autumn");
    }

    #[test]
    fn test_indexing_validate_checks_range() {
        let schema = indexing(vec!["a", "b"]);
        assert!(schema.validate(&Value::Number(0.0)));
        assert!(schema.validate(&Value::Number(1.0)));
        assert!(!schema.validate(&Value::Number(2.0)));
        assert!(!schema.validate(&Value::Number(-1.0)));
        assert!(!schema.validate(&Value::Number(0.5)));
        assert!(!schema.validate(&Value::from("0")));
    }

    #[test]
    #[should_panic(expected = "absent from indexing reference list")]
    fn test_indexing_encode_of_absent_value_is_fatal() {
        indexing(vec!["a", "b"]).encode(&"c");
    }

    #[test]
    fn test_mapping_round_trip() {
        let schema = mapping([("low", 1), ("high", 10)]);
        let encoded = schema.encode(&10);
        assert_eq!(encoded, Value::from("high"));
        assert!(schema.validate(&encoded));
        assert_eq!(schema.decode(&encoded), 10);
    }

    #[test]
    fn test_mapping_validate_checks_membership() {
        let schema = mapping([("low", 1), ("high", 10)]);
        assert!(schema.validate(&Value::from("low")));
        assert!(!schema.validate(&Value::from("medium")));
        assert!(!schema.validate(&Value::Number(1.0)));
    }

    #[test]
    #[should_panic(expected = "absent from mapping reference table")]
    fn test_mapping_encode_of_absent_value_is_fatal() {
        mapping([("low", 1), ("high", 10)]).encode(&5);
    }
}

//! Functorial combinators: lift an existing schema to a new domain type,
//! a new representation shape, or a deferred definition.
//!
//! - [`contra`] changes the domain type, keeping the wire shape
//! - [`co`] changes the wire shape, keeping the domain type
//! - [`lazy`] re-invokes a producer on every call; required for recursion
//! - [`memoized`] invokes the producer once; the non-recomputing variant
//!   for expensive aggregate definitions

use std::sync::OnceLock;

use crate::contract::Schema;
use crate::value::Value;

/// Domain-side lift. See [`contra`].
#[derive(Debug, Clone)]
pub struct Contra<S, E, D> {
    inner: S,
    to_base: E,
    from_base: D,
}

/// Representation-side lift. See [`co`].
#[derive(Debug, Clone)]
pub struct Co<S, E, D, V> {
    inner: S,
    wrap: E,
    unwrap: D,
    check: V,
}

/// Deferred schema, recomputed per call. See [`lazy`].
#[derive(Debug, Clone)]
pub struct Lazy<F> {
    producer: F,
}

/// Deferred schema, computed once. See [`memoized`].
#[derive(Debug)]
pub struct Memoized<F, S> {
    producer: F,
    cell: OnceLock<S>,
}

/// Adapts a schema to a different domain type with the same wire shape.
///
/// `to_base` forgets the new domain down to the inner one for encoding;
/// `from_base` rebuilds it after decoding. Representation and validation
/// are untouched.
pub fn contra<S, T, E, D>(inner: S, to_base: E, from_base: D) -> Contra<S, E, D>
where
    S: Schema,
    E: Fn(&T) -> S::Domain,
    D: Fn(S::Domain) -> T,
{
    Contra { inner, to_base, from_base }
}

/// Adapts a schema to a different wire shape with the same domain type.
///
/// `wrap` transforms the inner encoding into the new shape, `unwrap`
/// recovers the inner shape before decoding, and `check` is a fresh
/// validator for the new shape (the inner validator no longer applies).
pub fn co<S, E, D, V>(inner: S, wrap: E, unwrap: D, check: V) -> Co<S, E, D, V>
where
    S: Schema,
    E: Fn(Value) -> Value,
    D: Fn(&Value) -> Value,
    V: Fn(&Value) -> bool,
{
    Co { inner, wrap, unwrap, check }
}

/// Defers schema construction behind a producer invoked on every call.
///
/// This is what makes self-referential definitions possible: a recursive
/// schema function wraps its own recursive position in `lazy` so nothing
/// recurses at construction time. The cost is that every encode, decode,
/// and validate re-derives the deferred subtree; wrap the definition in
/// [`memoized`] where that matters and recursion is not involved.
pub fn lazy<F, S>(producer: F) -> Lazy<F>
where
    F: Fn() -> S,
    S: Schema,
{
    Lazy { producer }
}

/// Defers schema construction behind a producer invoked exactly once.
///
/// First use constructs the schema and caches it; later calls reuse it.
/// Initialization is thread-safe. Not suitable for the recursive position
/// of a self-referential definition, where construction must stay lazy
/// all the way down.
pub fn memoized<F, S>(producer: F) -> Memoized<F, S>
where
    F: Fn() -> S,
    S: Schema,
{
    Memoized { producer, cell: OnceLock::new() }
}

impl<S, T, E, D> Schema for Contra<S, E, D>
where
    S: Schema,
    E: Fn(&T) -> S::Domain,
    D: Fn(S::Domain) -> T,
{
    type Domain = T;

    fn encode(&self, value: &T) -> Value {
        self.inner.encode(&(self.to_base)(value))
    }

    fn decode(&self, repr: &Value) -> T {
        (self.from_base)(self.inner.decode(repr))
    }

    fn validate(&self, repr: &Value) -> bool {
        self.inner.validate(repr)
    }
}

impl<S, E, D, V> Schema for Co<S, E, D, V>
where
    S: Schema,
    E: Fn(Value) -> Value,
    D: Fn(&Value) -> Value,
    V: Fn(&Value) -> bool,
{
    type Domain = S::Domain;

    fn encode(&self, value: &Self::Domain) -> Value {
        (self.wrap)(self.inner.encode(value))
    }

    fn decode(&self, repr: &Value) -> Self::Domain {
        self.inner.decode(&(self.unwrap)(repr))
    }

    fn validate(&self, repr: &Value) -> bool {
        (self.check)(repr)
    }
}

impl<F, S> Schema for Lazy<F>
where
    F: Fn() -> S,
    S: Schema,
{
    type Domain = S::Domain;

    fn encode(&self, value: &Self::Domain) -> Value {
        (self.producer)().encode(value)
    }

    fn decode(&self, repr: &Value) -> Self::Domain {
        (self.producer)().decode(repr)
    }

    fn validate(&self, repr: &Value) -> bool {
        (self.producer)().validate(repr)
    }
}

impl<F, S> Memoized<F, S>
where
    F: Fn() -> S,
{
    fn get(&self) -> &S {
        self.cell.get_or_init(&self.producer)
    }
}

impl<F, S> Schema for Memoized<F, S>
where
    F: Fn() -> S,
    S: Schema,
{
    type Domain = S::Domain;

    fn encode(&self, value: &Self::Domain) -> Value {
        self.get().encode(value)
    }

    fn decode(&self, repr: &Value) -> Self::Domain {
        self.get().decode(repr)
    }

    fn validate(&self, repr: &Value) -> bool {
        self.get().validate(repr)
    }
}

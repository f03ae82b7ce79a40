//! Sum-type combinators.
//!
//! Dispatch rules:
//! - Encoding a [`union_of`] matches on the [`Either`] tag; there is no
//!   predicate pair and no unreachable fallback
//! - Decoding and validation try the left branch first, then the right;
//!   when both branches would accept a value, left always wins
//! - [`optional`] is the undefined-or-value special case with domain
//!   `Option<T>`

use crate::contract::{contract_violation, Schema};
use crate::value::Value;

/// The domain of a [`union_of`] schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Either<L, R> {
    /// The left branch.
    Left(L),
    /// The right branch.
    Right(R),
}

/// Tagged union schema over two domain types. See [`union_of`].
#[derive(Debug, Clone)]
pub struct UnionOf<L, R> {
    left: L,
    right: R,
}

/// Left-biased union schema over one shared domain type. See [`union`].
#[derive(Debug, Clone)]
pub struct Union<L, R> {
    left: L,
    right: R,
}

/// Optionality schema. See [`optional`].
#[derive(Debug, Clone)]
pub struct Optional<S> {
    inner: S,
}

/// A schema for a value that is either `left`'s domain or `right`'s.
///
/// The domain is [`Either`]; encoding dispatches by matching on the tag,
/// so a branch mismatch is impossible by construction. Decoding and
/// validation ask `left.validate` first and fall back to the right branch:
/// a representation acceptable to both sides always decodes as `Left`.
pub fn union_of<L: Schema, R: Schema>(left: L, right: R) -> UnionOf<L, R> {
    UnionOf { left, right }
}

/// A schema for one domain type with two wire forms, preferring the left.
///
/// Both schemas must share a domain type. Encoding tries the left schema
/// and keeps its output whenever the left schema validates it, falling
/// back to the right schema otherwise; decoding and validation are
/// likewise left-biased. Useful when a type gains a new canonical wire
/// form (left) but must keep reading a legacy one (right).
pub fn union<T, L, R>(left: L, right: R) -> Union<L, R>
where
    L: Schema<Domain = T>,
    R: Schema<Domain = T>,
{
    Union { left, right }
}

/// A schema for a value that may be entirely absent.
///
/// `None` encodes as `Undefined`, which a containing
/// [`record_of`](crate::structural::record_of) omits from the record, so
/// an optional field may be missing, explicitly undefined, or present.
pub fn optional<S: Schema>(inner: S) -> Optional<S> {
    Optional { inner }
}

impl<L: Schema, R: Schema> Schema for UnionOf<L, R> {
    type Domain = Either<L::Domain, R::Domain>;

    fn encode(&self, value: &Self::Domain) -> Value {
        match value {
            Either::Left(l) => self.left.encode(l),
            Either::Right(r) => self.right.encode(r),
        }
    }

    fn decode(&self, repr: &Value) -> Self::Domain {
        if self.left.validate(repr) {
            Either::Left(self.left.decode(repr))
        } else if self.right.validate(repr) {
            Either::Right(self.right.decode(repr))
        } else {
            contract_violation("no union branch validates the value", repr)
        }
    }

    fn validate(&self, repr: &Value) -> bool {
        self.left.validate(repr) || self.right.validate(repr)
    }
}

impl<T, L, R> Schema for Union<L, R>
where
    L: Schema<Domain = T>,
    R: Schema<Domain = T>,
{
    type Domain = T;

    fn encode(&self, value: &T) -> Value {
        let left = self.left.encode(value);
        if self.left.validate(&left) {
            left
        } else {
            self.right.encode(value)
        }
    }

    fn decode(&self, repr: &Value) -> T {
        if self.left.validate(repr) {
            self.left.decode(repr)
        } else if self.right.validate(repr) {
            self.right.decode(repr)
        } else {
            contract_violation("no union branch validates the value", repr)
        }
    }

    fn validate(&self, repr: &Value) -> bool {
        self.left.validate(repr) || self.right.validate(repr)
    }
}

impl<S: Schema> Schema for Optional<S> {
    type Domain = Option<S::Domain>;

    fn encode(&self, value: &Self::Domain) -> Value {
        match value {
            None => Value::Undefined,
            Some(inner) => self.inner.encode(inner),
        }
    }

    fn decode(&self, repr: &Value) -> Self::Domain {
        match repr {
            Value::Undefined => None,
            other => Some(self.inner.decode(other)),
        }
    }

    fn validate(&self, repr: &Value) -> bool {
        matches!(repr, Value::Undefined) || self.inner.validate(repr)
    }
}

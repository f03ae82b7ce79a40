//! The schema contract: three operations over a (domain, representation)
//! pair.
//!
//! Every schema upholds the same invariants:
//! - `validate` is a pure predicate; true means the value is safe to decode
//! - `decode(encode(x))` equals `x` under the domain type's own equality
//! - `encode` never validates its input; the caller owns a well-typed value
//! - `validate` accepts every value `encode` produces
//!
//! Error channels are strictly separated. Malformed external input is
//! reported by `validate` returning false (or [`Schema::checked_decode`]
//! returning an error), never by a panic. Calling `decode` on a value that
//! does not validate, or `encode` on a value outside a schema's reference
//! set, is a contract violation: a bug in schema composition or caller
//! discipline, reported by an unrecoverable panic.

use std::rc::Rc;
use std::sync::Arc;

use thiserror::Error;

use crate::value::Value;

/// Rejected input from [`Schema::checked_decode`].
///
/// Carries the kind of the offending value. This is a data-quality signal,
/// not a bug: callers feeding untrusted input should expect and handle it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value of kind '{kind}' does not satisfy the schema")]
pub struct InvalidValue {
    /// Kind name of the rejected value.
    pub kind: &'static str,
}

/// A bidirectional transform plus a runtime shape check.
///
/// `Domain` is the in-memory application-facing type; the representation is
/// always a [`Value`] tree. Schemas are immutable, side-effect-free values:
/// build one once, share it freely, and call its operations any number of
/// times from any number of threads.
pub trait Schema {
    /// The in-memory type this schema serializes.
    type Domain;

    /// Serializes a well-formed domain value.
    ///
    /// Never validates its input. Panics only on contract violations such
    /// as an `indexing` value absent from the reference list.
    fn encode(&self, value: &Self::Domain) -> Value;

    /// Rebuilds a domain value from its representation.
    ///
    /// # Panics
    ///
    /// Panics if `repr` does not satisfy [`Schema::validate`]. Callers
    /// holding untrusted input must validate first or use
    /// [`Schema::checked_decode`].
    fn decode(&self, repr: &Value) -> Self::Domain;

    /// Returns whether `repr` has the shape this schema decodes.
    ///
    /// Pure and deterministic; never panics on any input.
    fn validate(&self, repr: &Value) -> bool;

    /// Validates, then decodes; the single-call path for untrusted input.
    fn checked_decode(&self, repr: &Value) -> Result<Self::Domain, InvalidValue> {
        if self.validate(repr) {
            Ok(self.decode(repr))
        } else {
            Err(InvalidValue { kind: repr.kind() })
        }
    }
}

/// A boxed schema with an erased combinator type.
///
/// Needed wherever a schema's definition refers to itself: a recursive
/// schema function returns `DynSchema` so its type stays finite, with
/// [`lazy`](crate::transform::lazy) deferring the recursive call.
pub type DynSchema<T> = Box<dyn Schema<Domain = T>>;

impl<'a, S: Schema + ?Sized> Schema for &'a S {
    type Domain = S::Domain;

    fn encode(&self, value: &Self::Domain) -> Value {
        (**self).encode(value)
    }

    fn decode(&self, repr: &Value) -> Self::Domain {
        (**self).decode(repr)
    }

    fn validate(&self, repr: &Value) -> bool {
        (**self).validate(repr)
    }
}

impl<S: Schema + ?Sized> Schema for Box<S> {
    type Domain = S::Domain;

    fn encode(&self, value: &Self::Domain) -> Value {
        (**self).encode(value)
    }

    fn decode(&self, repr: &Value) -> Self::Domain {
        (**self).decode(repr)
    }

    fn validate(&self, repr: &Value) -> bool {
        (**self).validate(repr)
    }
}

impl<S: Schema + ?Sized> Schema for Rc<S> {
    type Domain = S::Domain;

    fn encode(&self, value: &Self::Domain) -> Value {
        (**self).encode(value)
    }

    fn decode(&self, repr: &Value) -> Self::Domain {
        (**self).decode(repr)
    }

    fn validate(&self, repr: &Value) -> bool {
        (**self).validate(repr)
    }
}

impl<S: Schema + ?Sized> Schema for Arc<S> {
    type Domain = S::Domain;

    fn encode(&self, value: &Self::Domain) -> Value {
        (**self).encode(value)
    }

    fn decode(&self, repr: &Value) -> Self::Domain {
        (**self).decode(repr)
    }

    fn validate(&self, repr: &Value) -> bool {
        (**self).validate(repr)
    }
}

/// Aborts on a schema contract violation.
///
/// Reached only through misuse: decoding a value that does not validate,
/// or encoding a value a reference-set combinator cannot represent.
#[cold]
pub(crate) fn contract_violation(context: &str, found: &Value) -> ! {
    panic!("schema contract violation: {} (found {})", context, found.kind())
}

//! Dependency-injected reconstruction for domain types holding a
//! collaborator that cannot be serialized.
//!
//! An [`Injecting`] schema is deliberately asymmetric and therefore not a
//! [`Schema`]: encoding forgets the collaborator via `project`, but
//! decoding can only reach the context-free base value. Reconstruction is
//! a second phase under caller control: [`Injecting::inject`] is called
//! once per instance, after the caller has obtained the context the
//! persisted form could not carry.

use crate::contract::{InvalidValue, Schema};
use crate::value::Value;

/// Two-phase schema for a domain type with an external dependency.
/// See [`injecting`].
#[derive(Debug, Clone)]
pub struct Injecting<S, P, I> {
    base: S,
    project: P,
    inject: I,
}

/// Builds an injection schema from a base schema, a projection that
/// forgets the context, and a reconstruction function that restores it.
///
/// `base` serializes the context-free base value `B`. `project` maps the
/// full domain value down to `B` for encoding. `inject` takes the context
/// and a decoded `B` and produces the full value; the library never calls
/// it on its own because the context is genuinely unavailable at decode
/// time.
pub fn injecting<T, D, S, P, I>(base: S, project: P, inject: I) -> Injecting<S, P, I>
where
    S: Schema,
    P: Fn(&T) -> S::Domain,
    I: Fn(D, S::Domain) -> T,
{
    Injecting { base, project, inject }
}

impl<S, P, I> Injecting<S, P, I>
where
    S: Schema,
{
    /// Serializes a full domain value by projecting away its context.
    pub fn encode<T>(&self, value: &T) -> Value
    where
        P: Fn(&T) -> S::Domain,
    {
        self.base.encode(&(self.project)(value))
    }

    /// Returns whether `repr` has the base schema's shape.
    pub fn validate(&self, repr: &Value) -> bool {
        self.base.validate(repr)
    }

    /// Phase 1: decodes the context-free base value.
    ///
    /// # Panics
    ///
    /// Panics if `repr` does not satisfy [`Injecting::validate`].
    pub fn decode_base(&self, repr: &Value) -> S::Domain {
        self.base.decode(repr)
    }

    /// Validating variant of [`Injecting::decode_base`] for untrusted
    /// input.
    pub fn checked_decode_base(&self, repr: &Value) -> Result<S::Domain, InvalidValue> {
        self.base.checked_decode(repr)
    }

    /// Phase 2: reconstructs the full domain value from a context and a
    /// decoded base value.
    pub fn inject<T, D>(&self, context: D, base: S::Domain) -> T
    where
        I: Fn(D, S::Domain) -> T,
    {
        (self.inject)(context, base)
    }

    /// Both phases at once, for callers that already hold the context.
    pub fn decode_with<T, D>(&self, context: D, repr: &Value) -> T
    where
        I: Fn(D, S::Domain) -> T,
    {
        let base = self.decode_base(repr);
        (self.inject)(context, base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{number, string};
    use crate::structural::{field, record_of};
    use serde_json::json;

    /// A live collaborator that cannot be persisted.
    struct Clock {
        epoch: f64,
    }

    struct Timer<'a> {
        label: String,
        elapsed: f64,
        clock: &'a Clock,
    }

    fn timer_schema<'a>() -> Injecting<
        impl Schema<Domain = (String, f64)>,
        impl Fn(&Timer<'a>) -> (String, f64),
        impl Fn(&'a Clock, (String, f64)) -> Timer<'a>,
    > {
        injecting(
            record_of((field("label", string()), field("elapsed", number()))),
            |t: &Timer<'a>| (t.label.clone(), t.elapsed),
            |clock: &'a Clock, (label, elapsed)| Timer { label, elapsed, clock },
        )
    }

    #[test]
    fn test_encode_forgets_the_context() {
        let clock = Clock { epoch: 0.0 };
        let timer = Timer { label: "boot".to_string(), elapsed: 12.5, clock: &clock };

        let schema = timer_schema();
        let encoded = schema.encode(&timer);
        assert_eq!(
            encoded,
            Value::from_json(json!({"label": "boot", "elapsed": 12.5}))
        );
        assert!(schema.validate(&encoded));
    }

    #[test]
    fn test_two_phase_reconstruction() {
        let clock = Clock { epoch: 7.0 };
        let schema = timer_schema();
        let repr = Value::from_json(json!({"label": "boot", "elapsed": 12.5}));

        let base = schema.decode_base(&repr);
        assert_eq!(base, ("boot".to_string(), 12.5));

        let timer: Timer<'_> = schema.inject(&clock, base);
        assert_eq!(timer.label, "boot");
        assert_eq!(timer.elapsed, 12.5);
        assert_eq!(timer.clock.epoch, 7.0);
    }

    #[test]
    fn test_decode_with_runs_both_phases() {
        let clock = Clock { epoch: 7.0 };
        let schema = timer_schema();
        let repr = Value::from_json(json!({"label": "boot", "elapsed": 12.5}));

        let timer: Timer<'_> = schema.decode_with(&clock, &repr);
        assert_eq!(timer.elapsed, 12.5);
    }

    #[test]
    fn test_checked_decode_base_rejects_bad_input() {
        let schema = timer_schema();
        let err = schema
            .checked_decode_base(&Value::from_json(json!({"label": 3})))
            .unwrap_err();
        assert_eq!(err.kind, "record");
    }
}

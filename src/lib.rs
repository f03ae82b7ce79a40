//! wireform - a strict, composable serialization/validation combinator
//! library over a JSON-like value tree.
//!
//! A [`Schema`] bundles three pure operations for one domain type:
//! `encode` to a [`Value`] wire tree, `decode` back from it, and
//! `validate`, a runtime shape check that makes an opaque parsed value
//! safe to decode. Schemas are built once from the combinators below and
//! reused for any number of calls; they hold no state and perform no I/O.
//!
//! # Error channels
//!
//! - Malformed external input is reported by `validate` returning false,
//!   or by [`Schema::checked_decode`] returning [`InvalidValue`], never
//!   by a panic.
//! - Contract violations (decoding a value that does not validate,
//!   encoding a value absent from an `indexing`/`mapping` reference set)
//!   indicate a bug in schema composition or caller discipline and abort
//!   with a panic.
//!
//! # Example
//!
//! ```
//! use wireform::{class_of, field, number, optional, string, Schema, Value};
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct Tile {
//!     name: String,
//!     weight: f64,
//!     note: Option<String>,
//! }
//!
//! let schema = class_of(
//!     (
//!         field("name", string()),
//!         field("weight", number()),
//!         field("note", optional(string())),
//!     ),
//!     |t: &Tile| (t.name.clone(), t.weight, t.note.clone()),
//!     |(name, weight, note)| Tile { name, weight, note },
//! );
//!
//! let tile = Tile { name: "marsh".to_string(), weight: 0.25, note: None };
//!
//! // Persist: encode, then hand the tree to serde_json.
//! let encoded = schema.encode(&tile);
//! assert_eq!(encoded.to_json().unwrap(), json!({"name": "marsh", "weight": 0.25}));
//!
//! // Load: parse, validate, and only then decode.
//! let parsed = Value::from_json(json!({"name": "marsh", "weight": 0.25}));
//! assert!(schema.validate(&parsed));
//! assert_eq!(schema.decode(&parsed), tile);
//!
//! // Untrusted input never panics through the checked path.
//! let bad = Value::from_json(json!({"name": 7}));
//! assert!(schema.checked_decode(&bad).is_err());
//! ```

pub mod constraint;
pub mod contract;
pub mod inject;
pub mod primitive;
pub mod structural;
pub mod transform;
pub mod union;
pub mod value;

pub use constraint::{asserting, constrain, indexing, mapping, matching};
pub use contract::{DynSchema, InvalidValue, Schema};
pub use inject::{injecting, Injecting};
pub use primitive::{any, boolean, literal, null, number, string, undefined};
pub use structural::{
    array_of, class_of, field, map_of, non_empty_array_of, object_of, record_of, tuple_of,
};
pub use transform::{co, contra, lazy, memoized};
pub use union::{optional, union, union_of, Either};
pub use value::{JsonError, Value};

//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the validation system:
//!
//! - **Traits**: [`Validate`], [`Coerce`], [`Mask`], [`ValidateExt`]
//! - **Errors**: [`FieldError`], [`ErrorKind`], [`ValidationErrors`]
//! - **Paths**: [`FieldPath`], [`PathSegment`]
//!
//! # Errors as values
//!
//! Validation returns `Result<Value, ValidationErrors>`. A failing call
//! carries every problem in the input, each located by its path:
//!
//! ```
//! use shapeguard_validator::prelude::*;
//! use serde_json::json;
//!
//! let port = object([("name", string()), ("source", enums(["imos", "predictive"]))]);
//! let errors = port.validate(&json!({"name": 7})).unwrap_err();
//!
//! assert_eq!(errors.len(), 2);
//! assert_eq!(errors.errors()[0].kind, ErrorKind::WrongType);
//! assert_eq!(errors.errors()[1].kind, ErrorKind::MissingRequired);
//! assert_eq!(errors.errors()[1].path.to_string(), "source");
//! ```

pub mod error;
pub mod path;
pub mod traits;

pub use error::{ErrorKind, FieldError, ValidationErrors};
pub use path::{FieldPath, PathSegment};
pub use traits::{Coerce, Mask, Validate, ValidateExt};

/// Returns the JSON type name of a value, as used in `WrongType` errors.
#[must_use]
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Structural JSON equality in which numbers compare by value, so `1`
/// equals `1.0`.
#[must_use]
pub fn json_eq(a: &serde_json::Value, b: &serde_json::Value) -> bool {
    use serde_json::Value;

    match (a, b) {
        (Value::Number(x), Value::Number(y)) => number_eq(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| json_eq(x, y)))
        }
        _ => a == b,
    }
}

/// Whether `value` is one of `values` under [`json_eq`].
#[must_use]
pub fn enum_contains(values: &[serde_json::Value], value: &serde_json::Value) -> bool {
    values.iter().any(|allowed| json_eq(allowed, value))
}

#[allow(clippy::float_cmp)]
fn number_eq(x: &serde_json::Number, y: &serde_json::Number) -> bool {
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        return x == y;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => x == y,
    }
}

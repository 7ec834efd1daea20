//! Core traits for the validation system
//!
//! [`Validate`], [`Coerce`] and [`Mask`] are the three operations a schema
//! offers over a JSON value. [`Schema`](crate::schema::Schema) implements all
//! of them; [`ValidateExt`] layers the composite operations on top.

use crate::foundation::ValidationErrors;
use crate::validate::{ParseError, ValidateOptions};
use serde::de::DeserializeOwned;
use serde_json::Value;

// ============================================================================
// CORE TRAITS
// ============================================================================

/// Checks a value against a schema.
///
/// Validation never stops at the first failure: the error collection covers
/// the whole input.
///
/// # Examples
///
/// ```
/// use shapeguard_validator::prelude::*;
/// use serde_json::json;
///
/// let port = object([("name", string()), ("locode", string().optional())]);
/// assert_eq!(port.validate(&json!({"name": "SGSIN"})), Ok(json!({"name": "SGSIN"})));
/// ```
pub trait Validate {
    /// Validates `input`, returning the accepted value or every error found.
    ///
    /// Unknown object fields are handled according to each object's
    /// policy unless `options` overrides it.
    fn validate_with(
        &self,
        input: &Value,
        options: &ValidateOptions,
    ) -> Result<Value, ValidationErrors>;

    /// Validates `input` with default options.
    fn validate(&self, input: &Value) -> Result<Value, ValidationErrors> {
        self.validate_with(input, &ValidateOptions::default())
    }
}

/// Applies the coercion rules and defaults attached to a schema.
///
/// Coercion never fails; it rewrites only the values that would fail their
/// node's base check, plus absent fields that carry a default or a rule.
pub trait Coerce {
    /// Returns a coerced copy of `input`.
    fn coerce(&self, input: &Value) -> Value;
}

/// Strips fields a schema does not declare.
pub trait Mask {
    /// Returns a copy of `input` restricted to declared fields.
    fn mask(&self, input: &Value) -> Value;
}

// ============================================================================
// EXTENSION TRAIT
// ============================================================================

/// Composite operations, implemented for every type that can both coerce
/// and validate.
pub trait ValidateExt: Validate + Coerce {
    /// Returns true when `input` validates without errors.
    fn is_valid(&self, input: &Value) -> bool {
        self.validate(input).is_ok()
    }

    /// Coerces `input`, then validates the coerced value.
    ///
    /// This is the only supported ordering: validating first would report
    /// errors against values the coercer is about to replace.
    fn create(&self, input: &Value) -> Result<Value, ValidationErrors> {
        self.validate(&self.coerce(input))
    }

    /// Validates `input` and deserializes the accepted value into `T`.
    fn parse<T: DeserializeOwned>(&self, input: &Value) -> Result<T, ParseError> {
        let accepted = self.validate(input)?;
        Ok(serde_json::from_value(accepted)?)
    }
}

impl<T: Validate + Coerce + ?Sized> ValidateExt for T {}

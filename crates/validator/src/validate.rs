//! The validator: walks a value against a schema and collects every error.
//!
//! - Objects: each declared field in declaration order. An absent field is
//!   `MissingRequired` unless it is optional or declares a default (the
//!   default is then inserted into the accepted value). Undeclared fields
//!   follow the object's [`UnknownFields`] policy, or the per-call override
//!   in [`ValidateOptions`].
//! - Arrays: every element, with its index appended to the path.
//! - Enums: strict JSON equality with one of the allowed values.
//! - `null`: accepted only by nullable nodes.
//!
//! Errors are never short-circuited. They come out in declaration order
//! within an object, depth-first across nesting.

use crate::foundation::{
    FieldError, FieldPath, PathSegment, Validate, ValidationErrors, enum_contains, json_type_name,
};
use crate::schema::{ObjectSchema, Schema, SchemaKind, UnknownFields};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// OPTIONS
// ============================================================================

/// Per-call validation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateOptions {
    /// Overrides the unknown-field policy of every object when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown_fields: Option<UnknownFields>,
}

impl ValidateOptions {
    /// Options that leave every object's own policy in place.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the unknown-field policy of every object.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_unknown_fields(mut self, policy: UnknownFields) -> Self {
        self.unknown_fields = Some(policy);
        self
    }

    /// Drops undeclared fields everywhere.
    #[must_use]
    pub fn strip_unknown() -> Self {
        Self::new().with_unknown_fields(UnknownFields::Strip)
    }

    /// Rejects undeclared fields everywhere.
    #[must_use]
    pub fn strict() -> Self {
        Self::new().with_unknown_fields(UnknownFields::Reject)
    }
}

// ============================================================================
// PARSE ERROR
// ============================================================================

/// Failure of [`ValidateExt::parse`](crate::foundation::ValidateExt::parse).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The value failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// The accepted value does not fit the target type.
    #[error("accepted value does not match the target type: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl ParseError {
    /// The validation errors, if validation is what failed.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Deserialize(_) => None,
        }
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

impl Validate for Schema {
    fn validate_with(
        &self,
        input: &Value,
        options: &ValidateOptions,
    ) -> Result<Value, ValidationErrors> {
        let mut walker = Walker::new(options);
        let accepted = walker.node(self, input);
        tracing::debug!(
            errors = walker.errors.len(),
            schema = self.type_name(),
            "validation finished"
        );
        match accepted {
            Some(value) if !walker.errors.has_errors() => Ok(value),
            _ => Err(walker.errors),
        }
    }
}

/// Validates `value` against `schema` with default options.
/// Equivalent to [`Validate::validate`].
pub fn validate(schema: &Schema, value: &Value) -> Result<Value, ValidationErrors> {
    schema.validate(value)
}

struct Walker<'o> {
    options: &'o ValidateOptions,
    path: FieldPath,
    errors: ValidationErrors,
}

impl<'o> Walker<'o> {
    fn new(options: &'o ValidateOptions) -> Self {
        Self {
            options,
            path: FieldPath::root(),
            errors: ValidationErrors::new(),
        }
    }

    fn fail(&mut self, error: FieldError) -> Option<Value> {
        self.errors.add(error);
        None
    }

    fn wrong_type(&mut self, schema: &Schema, value: &Value) -> Option<Value> {
        let error = FieldError::wrong_type(
            self.path.clone(),
            schema.type_name(),
            json_type_name(value),
        );
        self.fail(error)
    }

    /// Returns the accepted value, or `None` after recording errors.
    fn node(&mut self, schema: &Schema, value: &Value) -> Option<Value> {
        if value.is_null() {
            if schema.is_nullable() {
                return Some(Value::Null);
            }
            let error = FieldError::null_not_allowed(self.path.clone());
            return self.fail(error);
        }

        match schema.kind() {
            SchemaKind::String if value.is_string() => Some(value.clone()),
            SchemaKind::Number if value.is_number() => Some(value.clone()),
            SchemaKind::String | SchemaKind::Number => self.wrong_type(schema, value),
            SchemaKind::Enum { values } => {
                if enum_contains(values, value) {
                    Some(value.clone())
                } else {
                    let error = FieldError::not_in_enum(self.path.clone(), values, value);
                    self.fail(error)
                }
            }
            SchemaKind::Object(object) => match value.as_object() {
                Some(map) => self.object(object, map),
                None => self.wrong_type(schema, value),
            },
            SchemaKind::Array { element } => match value.as_array() {
                Some(items) => self.array(element, items),
                None => self.wrong_type(schema, value),
            },
        }
    }

    fn object(&mut self, object: &ObjectSchema, map: &Map<String, Value>) -> Option<Value> {
        let before = self.errors.len();
        let mut accepted = Map::with_capacity(map.len());

        for (name, field) in object.fields() {
            self.path.push(PathSegment::Key(name.clone()));
            match map.get(name) {
                Some(value) => {
                    if let Some(value) = self.node(field, value) {
                        accepted.insert(name.clone(), value);
                    }
                }
                None => {
                    if let Some(default) = field.default_value() {
                        accepted.insert(name.clone(), default.clone());
                    } else if !field.is_optional() {
                        let error = FieldError::missing_required(self.path.clone());
                        self.errors.add(error);
                    }
                }
            }
            self.path.pop();
        }

        let policy = self
            .options
            .unknown_fields
            .unwrap_or_else(|| object.unknown_fields());
        for (key, value) in map {
            if object.declares(key) {
                continue;
            }
            match policy {
                UnknownFields::Passthrough => {
                    accepted.insert(key.clone(), value.clone());
                }
                UnknownFields::Strip => {
                    tracing::trace!(path = %self.path.key(key.as_str()), "stripped unknown field");
                }
                UnknownFields::Reject => {
                    let error = FieldError::unknown_field(self.path.key(key.as_str()));
                    self.errors.add(error);
                }
            }
        }

        (self.errors.len() == before).then_some(Value::Object(accepted))
    }

    fn array(&mut self, element: &Schema, items: &[Value]) -> Option<Value> {
        let before = self.errors.len();
        let mut accepted = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            self.path.push(PathSegment::Index(index));
            if let Some(value) = self.node(element, item) {
                accepted.push(value);
            }
            self.path.pop();
        }

        (self.errors.len() == before).then_some(Value::Array(accepted))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ErrorKind, ValidateExt};
    use crate::schema::{array, enums, number, object, string};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn kinds(errors: &ValidationErrors) -> Vec<ErrorKind> {
        errors.iter().map(|e| e.kind).collect()
    }

    fn paths(errors: &ValidationErrors) -> Vec<String> {
        errors.iter().map(|e| e.path.to_string()).collect()
    }

    #[rstest]
    #[case(string(), json!(""))]
    #[case(string(), json!("SGSIN"))]
    #[case(number(), json!(0))]
    #[case(number(), json!(-1.5))]
    #[case(enums(["imos", "predictive"]), json!("predictive"))]
    #[case(enums([1, 2]), json!(2))]
    #[case(enums([1.0, 2.0]), json!(1))]
    #[case(enums([1, 2]), json!(2.0))]
    #[case(enums([json!({"n": 1})]), json!({"n": 1.0}))]
    #[case(array(number()), json!([]))]
    #[case(object([("a", string())]), json!({"a": "x"}))]
    fn test_accepts(#[case] schema: Schema, #[case] value: Value) {
        assert_eq!(schema.validate(&value), Ok(value));
    }

    #[rstest]
    #[case(string(), json!(1), ErrorKind::WrongType)]
    #[case(number(), json!("1"), ErrorKind::WrongType)]
    #[case(object([("a", string())]), json!([]), ErrorKind::WrongType)]
    #[case(array(string()), json!({}), ErrorKind::WrongType)]
    #[case(enums(["imos"]), json!("IMOS"), ErrorKind::NotInEnum)]
    #[case(enums([1]), json!("1"), ErrorKind::NotInEnum)]
    #[case(enums([1.0]), json!(1.5), ErrorKind::NotInEnum)]
    #[case(string(), json!(null), ErrorKind::NullNotAllowed)]
    fn test_rejects(#[case] schema: Schema, #[case] value: Value, #[case] kind: ErrorKind) {
        let errors = schema.validate(&value).unwrap_err();
        assert_eq!(kinds(&errors), [kind]);
        assert!(errors.errors()[0].path.is_root());
    }

    #[test]
    fn test_wrong_type_params() {
        let errors = number().validate(&json!("7")).unwrap_err();
        let error = &errors.errors()[0];
        assert_eq!(error.param("expected"), Some("number"));
        assert_eq!(error.param("actual"), Some("string"));
    }

    #[test]
    fn test_optional_and_nullable_are_independent() {
        let schema = object([
            ("nullable", string().nullable()),
            ("optional", string().optional()),
        ]);

        // nullable does not permit absence
        let errors = schema.validate(&json!({})).unwrap_err();
        assert_eq!(kinds(&errors), [ErrorKind::MissingRequired]);
        assert_eq!(paths(&errors), ["nullable"]);

        // optional does not permit null
        let errors = schema
            .validate(&json!({"nullable": null, "optional": null}))
            .unwrap_err();
        assert_eq!(kinds(&errors), [ErrorKind::NullNotAllowed]);
        assert_eq!(paths(&errors), ["optional"]);

        assert_eq!(
            schema.validate(&json!({"nullable": null})),
            Ok(json!({"nullable": null}))
        );
    }

    #[test]
    fn test_optional_nullable_field() {
        let schema = object([("code", string().nullable().optional())]);
        assert!(schema.is_valid(&json!({})));
        assert!(schema.is_valid(&json!({"code": null})));
        assert!(schema.is_valid(&json!({"code": "SIN"})));
        assert!(!schema.is_valid(&json!({"code": 1})));
    }

    #[test]
    fn test_default_is_inserted_for_absent_field() {
        let schema = object([("name", string()), ("count", number().default(0))]);
        assert_eq!(
            schema.validate(&json!({"name": "x"})),
            Ok(json!({"name": "x", "count": 0}))
        );
    }

    #[test]
    fn test_coercion_rule_does_not_apply_during_validation() {
        let schema = object([(
            "source",
            enums(["imos"]).with_coercion(crate::coerce::CoercionRule::FirstAllowed),
        )]);
        let errors = schema.validate(&json!({})).unwrap_err();
        assert_eq!(kinds(&errors), [ErrorKind::MissingRequired]);
    }

    #[test]
    fn test_errors_are_collected_in_declaration_order() {
        let schema = object([
            ("a", string()),
            ("b", number()),
            ("c", object([("d", string()), ("e", enums(["x"]))])),
            ("f", string()),
        ]);
        let errors = schema
            .validate(&json!({"f": 1, "c": {"e": "y"}, "b": "two"}))
            .unwrap_err();

        assert_eq!(paths(&errors), ["a", "b", "c.d", "c.e", "f"]);
        assert_eq!(
            kinds(&errors),
            [
                ErrorKind::MissingRequired,
                ErrorKind::WrongType,
                ErrorKind::MissingRequired,
                ErrorKind::NotInEnum,
                ErrorKind::WrongType,
            ]
        );
    }

    #[test]
    fn test_array_errors_carry_indices() {
        let schema = array(object([("n", number())]));
        let errors = schema
            .validate(&json!([{"n": 1}, {"n": "x"}, {}, {"n": null}]))
            .unwrap_err();
        assert_eq!(paths(&errors), ["[1].n", "[2].n", "[3].n"]);
    }

    #[test]
    fn test_unknown_fields_pass_through_by_default() {
        let schema = object([("name", string())]);
        let value = json!({"name": "x", "extra": [1, 2]});
        assert_eq!(schema.validate(&value), Ok(value));
    }

    #[test]
    fn test_unknown_fields_strip_policy() {
        let schema = object([("name", string()), ("inner", object([("a", number())]))])
            .strip_unknown();
        // only the outer object strips
        assert_eq!(
            schema.validate(&json!({"name": "x", "z": 1, "inner": {"a": 1, "b": 2}})),
            Ok(json!({"name": "x", "inner": {"a": 1, "b": 2}}))
        );
    }

    #[test]
    fn test_unknown_fields_reject_policy() {
        let schema = object([("name", string())]).strict();
        let errors = schema
            .validate(&json!({"zeta": 1, "name": 2, "alpha": 3}))
            .unwrap_err();
        assert_eq!(paths(&errors), ["name", "zeta", "alpha"]);
        assert_eq!(
            kinds(&errors),
            [
                ErrorKind::WrongType,
                ErrorKind::UnknownField,
                ErrorKind::UnknownField
            ]
        );
    }

    #[test]
    fn test_options_override_every_object() {
        let schema = object([("inner", object([("a", number())]))]).strict();
        let value = json!({"inner": {"a": 1, "b": 2}, "c": 3});
        let passthrough = ValidateOptions::new().with_unknown_fields(UnknownFields::Passthrough);

        assert_eq!(
            schema.validate_with(&value, &ValidateOptions::strip_unknown()),
            Ok(json!({"inner": {"a": 1}}))
        );
        assert_eq!(
            schema.validate_with(&value, &passthrough),
            Ok(value.clone())
        );
        let errors = object([("inner", object([("a", number())]))])
            .validate_with(&value, &ValidateOptions::strict())
            .unwrap_err();
        assert_eq!(paths(&errors), ["inner.b", "c"]);
    }

    #[test]
    fn test_parse_into_type() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Port {
            name: String,
            locode: Option<String>,
        }

        let schema = object([("name", string()), ("locode", string().optional())]);
        let port: Port = schema.parse(&json!({"name": "SGSIN"})).unwrap();
        assert_eq!(
            port,
            Port {
                name: "SGSIN".into(),
                locode: None
            }
        );

        let err = schema.parse::<Port>(&json!({})).unwrap_err();
        assert_eq!(err.validation_errors().map(ValidationErrors::len), Some(1));

        let err = object([("name", number())])
            .parse::<Port>(&json!({"name": 1}))
            .unwrap_err();
        assert!(matches!(err, ParseError::Deserialize(_)));
    }

    #[test]
    fn test_free_function_matches_trait() {
        let schema = object([("a", string())]);
        let value = json!({"a": 1});
        assert_eq!(validate(&schema, &value), schema.validate(&value));
    }
}

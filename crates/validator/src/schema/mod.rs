//! Schema nodes
//!
//! A [`Schema`] is a recursive description of an expected value shape: a
//! [`SchemaKind`] plus the modifiers that apply to the node wherever it is
//! used (`optional`, `nullable`, `default`, `coerce`).
//!
//! `optional` and `nullable` are independent axes. `nullable` permits an
//! explicit `null`; `optional` permits the key to be absent from its parent
//! object. A field may be both.
//!
//! Schemas are built once and then shared read-only across any number of
//! validation calls and threads.
//!
//! Schemas are also serde documents, which is how the CLI loads them:
//!
//! ```json
//! { "type": "object",
//!   "fields": {
//!     "name":   { "type": "string" },
//!     "locode": { "type": "string", "optional": true },
//!     "source": { "type": "enum", "values": ["imos", "predictive"],
//!                 "coerce": "first_allowed" } } }
//! ```

mod builder;
mod error;

pub use builder::{array, assign, enums, number, object, string};
pub use error::SchemaError;

use crate::coerce::CoercionRule;
use crate::foundation::{FieldPath, Validate, enum_contains};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// SCHEMA NODE
// ============================================================================

/// A schema node.
///
/// Construct nodes with the builder functions ([`string`], [`number`],
/// [`enums`], [`object`], [`array`]) and refine them with the modifier
/// methods, which consume and return the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(flatten)]
    kind: SchemaKind,

    #[serde(default, skip_serializing_if = "is_false")]
    optional: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    nullable: bool,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    default: Option<Value>,

    #[serde(default, rename = "coerce", skip_serializing_if = "Option::is_none")]
    coercion: Option<CoercionRule>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// A key that is present maps to `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// The shape a node expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaKind {
    /// Any JSON string, including the empty string.
    String,
    /// Any JSON number.
    Number,
    /// One of a fixed, ordered set of literal values.
    ///
    /// Membership is strict JSON equality. The order only matters for
    /// [`CoercionRule::FirstAllowed`].
    Enum { values: Vec<Value> },
    /// An object with declared fields.
    Object(ObjectSchema),
    /// An array whose elements all match `element`.
    Array { element: Box<Schema> },
}

impl SchemaKind {
    /// Name of the expected JSON type, as used in `WrongType` errors.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Enum { .. } => "enum",
            Self::Object(_) => "object",
            Self::Array { .. } => "array",
        }
    }
}

/// Policy for object fields the schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    /// Keep them in the accepted value unchanged.
    #[default]
    Passthrough,
    /// Drop them from the accepted value.
    Strip,
    /// Report each one as an `UnknownField` error.
    Reject,
}

impl UnknownFields {
    fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough)
    }
}

/// Fields of an object node, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    #[serde(default)]
    fields: IndexMap<String, Schema>,

    #[serde(default, skip_serializing_if = "UnknownFields::is_passthrough")]
    unknown: UnknownFields,
}

impl ObjectSchema {
    /// Declared fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, Schema> {
        &self.fields
    }

    /// Looks up a declared field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Schema> {
        self.fields.get(name)
    }

    /// Returns true if `name` is declared.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// The object's unknown-field policy.
    #[must_use]
    pub fn unknown_fields(&self) -> UnknownFields {
        self.unknown
    }
}

impl Schema {
    pub(crate) fn from_kind(kind: SchemaKind) -> Self {
        Self {
            kind,
            optional: false,
            nullable: false,
            default: None,
            coercion: None,
        }
    }

    /// The expected shape.
    #[must_use]
    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// Whether the key may be absent from its parent object.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether an explicit `null` is accepted.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Value used when the key is absent from its parent object.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Attached coercion rule.
    #[must_use]
    pub fn coercion(&self) -> Option<&CoercionRule> {
        self.coercion.as_ref()
    }

    /// Object fields, if this is an object node.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match &self.kind {
            SchemaKind::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Name of the expected JSON type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// The base check a coercion rule guards: `null` only if nullable,
    /// otherwise the right JSON type (and, for enums, membership).
    /// Does not look inside objects or arrays.
    pub(crate) fn accepts_shallow(&self, value: &Value) -> bool {
        if value.is_null() {
            return self.nullable;
        }
        match &self.kind {
            SchemaKind::String => value.is_string(),
            SchemaKind::Number => value.is_number(),
            SchemaKind::Enum { values } => enum_contains(values, value),
            SchemaKind::Object(_) => value.is_object(),
            SchemaKind::Array { .. } => value.is_array(),
        }
    }

    // ------------------------------------------------------------------------
    // Documents
    // ------------------------------------------------------------------------

    /// Parses a schema document and runs [`Schema::check`] on it.
    pub fn from_json_str(document: &str) -> Result<Self, SchemaError> {
        Self::from_json_value(serde_json::from_str(document)?)
    }

    /// Converts a JSON value into a schema and runs [`Schema::check`] on it.
    ///
    /// Keys a node of the given `type` does not understand are rejected, so
    /// a misspelled modifier cannot silently change the schema.
    pub fn from_json_value(document: Value) -> Result<Self, SchemaError> {
        reject_unknown_keys(&document, &FieldPath::root())?;
        let schema: Self = serde_json::from_value(document)?;
        schema.check()?;
        Ok(schema)
    }

    /// Serializes the schema as a document.
    ///
    /// Fails if the schema carries a custom coercion function.
    pub fn to_json_value(&self) -> Result<Value, SchemaError> {
        Ok(serde_json::to_value(self)?)
    }

    // ------------------------------------------------------------------------
    // Self-check
    // ------------------------------------------------------------------------

    /// Checks that the schema is internally consistent.
    ///
    /// - every enum declares at least one value
    /// - every default satisfies its own node
    /// - every fallback coercion value satisfies its node
    /// - `first_allowed` is only attached to enums
    /// - a custom rule's output for an absent field satisfies its node
    ///
    /// Returns the first problem in depth-first declaration order. Array
    /// element nodes are reported at index `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shapeguard_validator::prelude::*;
    ///
    /// let broken = object([("source", enums(["imos", "predictive"]).default("sgsin"))]);
    /// let error = broken.check().unwrap_err();
    /// assert_eq!(error.path().map(ToString::to_string).as_deref(), Some("source"));
    /// ```
    pub fn check(&self) -> Result<(), SchemaError> {
        self.check_at(&FieldPath::root())
    }

    fn check_at(&self, path: &FieldPath) -> Result<(), SchemaError> {
        if let SchemaKind::Enum { values } = &self.kind
            && values.is_empty()
        {
            return Err(SchemaError::EmptyEnum { path: path.clone() });
        }

        if let Some(default) = &self.default {
            self.validate(default)
                .map_err(|errors| SchemaError::InvalidDefault {
                    path: path.clone(),
                    errors,
                })?;
        }

        if let Some(rule) = &self.coercion {
            let produced = match rule {
                CoercionRule::FirstAllowed => {
                    if !matches!(self.kind, SchemaKind::Enum { .. }) {
                        return Err(SchemaError::FirstAllowedWithoutEnum {
                            path: path.clone(),
                            found: self.type_name(),
                        });
                    }
                    None
                }
                CoercionRule::Fallback(value) => Some(value.clone()),
                CoercionRule::Custom(_) => Some(rule.apply(self, None)),
            };
            if let Some(produced) = produced {
                self.validate(&produced)
                    .map_err(|errors| SchemaError::InvalidCoercion {
                        path: path.clone(),
                        errors,
                    })?;
            }
        }

        match &self.kind {
            SchemaKind::Object(object) => {
                for (name, field) in &object.fields {
                    field.check_at(&path.key(name.as_str()))?;
                }
            }
            SchemaKind::Array { element } => element.check_at(&path.index(0))?,
            _ => {}
        }

        Ok(())
    }
}

// ============================================================================
// DOCUMENT KEYS
// ============================================================================

const NODE_KEYS: [&str; 5] = ["type", "optional", "nullable", "default", "coerce"];

/// Walks a schema document and reports the first key its node kind does not
/// define. Shape errors (missing `type`, wrong JSON types) are left to serde.
fn reject_unknown_keys(document: &Value, path: &FieldPath) -> Result<(), SchemaError> {
    let Some(node) = document.as_object() else {
        return Ok(());
    };
    let kind_keys: &[&str] = match node.get("type").and_then(Value::as_str) {
        Some("enum") => &["values"],
        Some("object") => &["fields", "unknown"],
        Some("array") => &["element"],
        _ => &[],
    };

    if let Some(key) = node
        .keys()
        .find(|key| !NODE_KEYS.contains(&key.as_str()) && !kind_keys.contains(&key.as_str()))
    {
        return Err(SchemaError::UnknownKey {
            path: path.clone(),
            key: key.clone(),
        });
    }

    if let Some(fields) = node.get("fields").and_then(Value::as_object) {
        for (name, field) in fields {
            reject_unknown_keys(field, &path.key(name.as_str()))?;
        }
    }
    if let Some(element) = node.get("element") {
        reject_unknown_keys(element, &path.index(0))?;
    }
    Ok(())
}

//! Schema authoring API: one builder function per node kind, plus modifier
//! methods on [`Schema`].
//!
//! # Examples
//!
//! ```
//! use shapeguard_validator::prelude::*;
//!
//! let sources = ["imos", "predictive"];
//!
//! let port = object([
//!     ("name", string()),
//!     ("locode", string().optional()),
//!     ("source", enums(sources).with_coercion(CoercionRule::FirstAllowed)),
//! ]);
//!
//! let country = object([
//!     ("name", string()),
//!     ("ports", array(port)),
//!     ("meta", object([("count", number())]).optional()),
//! ]);
//! assert!(country.check().is_ok());
//! ```

use super::{ObjectSchema, Schema, SchemaKind, UnknownFields};
use crate::coerce::CoercionRule;
use serde_json::Value;
use std::borrow::Cow;

// ============================================================================
// BUILDER FUNCTIONS
// ============================================================================

/// A required, non-nullable string node.
#[must_use]
pub fn string() -> Schema {
    Schema::from_kind(SchemaKind::String)
}

/// A required, non-nullable number node.
#[must_use]
pub fn number() -> Schema {
    Schema::from_kind(SchemaKind::Number)
}

/// An enum node accepting exactly the given literals.
///
/// The first value is the canonical one used by
/// [`CoercionRule::FirstAllowed`].
pub fn enums<I, V>(values: I) -> Schema
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Schema::from_kind(SchemaKind::Enum {
        values: values.into_iter().map(Into::into).collect(),
    })
}

/// An array node whose elements all match `element`.
#[must_use]
pub fn array(element: Schema) -> Schema {
    Schema::from_kind(SchemaKind::Array {
        element: Box::new(element),
    })
}

/// An object node with the given fields, kept in iteration order.
///
/// A name given twice keeps its first position and its last definition.
pub fn object<I, K>(fields: I) -> Schema
where
    I: IntoIterator<Item = (K, Schema)>,
    K: Into<String>,
{
    Schema::from_kind(SchemaKind::Object(ObjectSchema {
        fields: fields
            .into_iter()
            .map(|(name, schema)| (name.into(), schema))
            .collect(),
        unknown: UnknownFields::default(),
    }))
}

/// Merges two object nodes.
///
/// Fields of `extension` are appended to those of `base`; a field declared
/// by both keeps the base position with the extension's definition. The
/// result takes the extension's unknown-field policy and the base's
/// modifiers. If either node is not an object, `base` is returned as is.
///
/// # Examples
///
/// ```
/// use shapeguard_validator::prelude::*;
///
/// let country = object([("name", string()), ("ports", array(string()))]);
/// let with_meta = assign(country, object([("meta", object([("count", number())]).optional())]));
///
/// let names: Vec<_> = with_meta.as_object().unwrap().fields().keys().cloned().collect();
/// assert_eq!(names, ["name", "ports", "meta"]);
/// ```
#[must_use]
pub fn assign(base: Schema, extension: Schema) -> Schema {
    let Schema {
        kind,
        optional,
        nullable,
        default,
        coercion,
    } = base;

    match (kind, extension.kind) {
        (SchemaKind::Object(mut merged), SchemaKind::Object(extra)) => {
            for (name, field) in extra.fields {
                merged.fields.insert(name, field);
            }
            merged.unknown = extra.unknown;
            Schema {
                kind: SchemaKind::Object(merged),
                optional,
                nullable,
                default,
                coercion,
            }
        }
        (kind, _) => Schema {
            kind,
            optional,
            nullable,
            default,
            coercion,
        },
    }
}

// ============================================================================
// MODIFIERS
// ============================================================================

impl Schema {
    /// Allows the key to be absent from its parent object.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Allows an explicit `null`.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Substitutes `value` when the key is absent from its parent object.
    ///
    /// The default should satisfy this node; [`Schema::check`] verifies it.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Attaches a coercion rule.
    pub fn with_coercion(mut self, rule: CoercionRule) -> Self {
        self.coercion = Some(rule);
        self
    }

    /// Attaches a named custom coercion function.
    pub fn with_coercion_fn<F>(self, name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(Option<&Value>) -> Value + Send + Sync + 'static,
    {
        self.with_coercion(CoercionRule::custom(name, func))
    }

    /// Sets the unknown-field policy. No effect on non-object nodes.
    pub fn unknown_fields(mut self, policy: UnknownFields) -> Self {
        if let SchemaKind::Object(object) = &mut self.kind {
            object.unknown = policy;
        }
        self
    }

    /// Rejects undeclared fields. Shorthand for `unknown_fields(Reject)`.
    pub fn strict(self) -> Self {
        self.unknown_fields(UnknownFields::Reject)
    }

    /// Drops undeclared fields. Shorthand for `unknown_fields(Strip)`.
    pub fn strip_unknown(self) -> Self {
        self.unknown_fields(UnknownFields::Strip)
    }

    /// Declares one more field. No effect on non-object nodes.
    pub fn with_field(mut self, name: impl Into<String>, field: Schema) -> Self {
        if let SchemaKind::Object(object) = &mut self.kind {
            object.fields.insert(name.into(), field);
        }
        self
    }
}

//! Coercion rules and the coercer.
//!
//! A [`CoercionRule`] is attached to a schema node with
//! [`Schema::with_coercion`](crate::schema::Schema::with_coercion). The coercer walks a
//! value alongside its schema and invokes a node's rule only when the raw
//! value fails that node's base check (null without `nullable`, wrong JSON
//! type, enum non-member) or when the field is absent from its parent
//! object. Absent fields that declare a default receive the default instead.
//!
//! Coercion never fails. Whether the produced value satisfies the schema is
//! the schema author's responsibility, checked by
//! [`Schema::check`](crate::schema::Schema::check).
//!
//! # Examples
//!
//! ```
//! use shapeguard_validator::prelude::*;
//! use serde_json::json;
//!
//! let port = object([
//!     ("name", string()),
//!     ("source", enums(["imos", "predictive"]).with_coercion(CoercionRule::FirstAllowed)),
//! ]);
//!
//! let coerced = port.coerce(&json!({"name": "Singapore", "source": "sgsin"}));
//! assert_eq!(coerced, json!({"name": "Singapore", "source": "imos"}));
//! ```

use crate::foundation::{Coerce, FieldPath, PathSegment};
use crate::schema::{Schema, SchemaKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// COERCION RULE
// ============================================================================

/// Signature of a custom coercion function. `None` means the field is absent.
pub type CoerceFn = dyn Fn(Option<&Value>) -> Value + Send + Sync;

/// Fallback transformation for values that fail a node's base check.
///
/// Rules must be idempotent: applying a rule to its own output must not
/// change it. The built-in rules are, provided their output satisfies the
/// node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionRule {
    /// Replace with the first allowed value of the enum node.
    FirstAllowed,
    /// Replace with a fixed value.
    Fallback(Value),
    /// Replace with the output of a function. Not serializable.
    #[serde(skip)]
    Custom(CustomCoercion),
}

impl CoercionRule {
    /// Wraps a function as a named custom rule.
    pub fn custom<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(Option<&Value>) -> Value + Send + Sync + 'static,
    {
        Self::Custom(CustomCoercion::new(name, func))
    }

    /// Produces the replacement value for `input` on `schema`.
    ///
    /// `FirstAllowed` on a node that is not an enum leaves the input as is
    /// (or `null` when absent); `Schema::check` reports that configuration.
    #[must_use]
    pub fn apply(&self, schema: &Schema, input: Option<&Value>) -> Value {
        match self {
            Self::FirstAllowed => match schema.kind() {
                SchemaKind::Enum { values } => values.first().cloned().unwrap_or(Value::Null),
                _ => input.cloned().unwrap_or(Value::Null),
            },
            Self::Fallback(value) => value.clone(),
            Self::Custom(custom) => custom.call(input),
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::FirstAllowed => "first_allowed",
            Self::Fallback(_) => "fallback",
            Self::Custom(custom) => custom.name(),
        }
    }
}

/// A named coercion function.
///
/// Two custom rules are equal only if they share the same function
/// allocation.
#[derive(Clone)]
pub struct CustomCoercion {
    name: Cow<'static, str>,
    func: Arc<CoerceFn>,
}

impl CustomCoercion {
    /// Creates a named custom rule.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(Option<&Value>) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// The rule's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the function.
    #[must_use]
    pub fn call(&self, input: Option<&Value>) -> Value {
        (self.func)(input)
    }
}

impl fmt::Debug for CustomCoercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCoercion")
            .field("name", &self.name)
            .field("func", &"<function>")
            .finish()
    }
}

impl PartialEq for CustomCoercion {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

// ============================================================================
// COERCER
// ============================================================================

impl Coerce for Schema {
    fn coerce(&self, input: &Value) -> Value {
        let mut coercer = Coercer::default();
        coercer
            .node(self, Some(input))
            .unwrap_or_else(|| input.clone())
    }
}

/// Coerces `value` against `schema`. Equivalent to [`Coerce::coerce`].
#[must_use]
pub fn coerce(schema: &Schema, value: &Value) -> Value {
    schema.coerce(value)
}

#[derive(Default)]
struct Coercer {
    path: FieldPath,
}

impl Coercer {
    /// Returns `None` only when the input is absent and nothing fills it.
    fn node(&mut self, schema: &Schema, input: Option<&Value>) -> Option<Value> {
        let Some(value) = input else {
            if let Some(default) = schema.default_value() {
                tracing::debug!(path = %self.path, "filled absent field with default");
                return Some(default.clone());
            }
            return schema.coercion().map(|rule| {
                tracing::debug!(path = %self.path, rule = rule.name(), "coerced absent field");
                rule.apply(schema, None)
            });
        };

        match schema.coercion() {
            Some(rule) if !schema.accepts_shallow(value) => {
                tracing::debug!(path = %self.path, rule = rule.name(), "coerced value");
                Some(rule.apply(schema, Some(value)))
            }
            _ => Some(self.structure(schema, value)),
        }
    }

    fn structure(&mut self, schema: &Schema, value: &Value) -> Value {
        match (schema.kind(), value) {
            (SchemaKind::Object(object), Value::Object(map)) => {
                let mut out = Map::with_capacity(map.len());
                for (key, item) in map {
                    match object.field(key) {
                        Some(field) => {
                            self.path.push(PathSegment::Key(key.clone()));
                            let coerced = self.node(field, Some(item));
                            self.path.pop();
                            out.insert(key.clone(), coerced.unwrap_or_else(|| item.clone()));
                        }
                        None => {
                            out.insert(key.clone(), item.clone());
                        }
                    }
                }
                for (name, field) in object.fields() {
                    if map.contains_key(name) {
                        continue;
                    }
                    self.path.push(PathSegment::Key(name.clone()));
                    if let Some(filled) = self.node(field, None) {
                        out.insert(name.clone(), filled);
                    }
                    self.path.pop();
                }
                Value::Object(out)
            }
            (SchemaKind::Array { element }, Value::Array(items)) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    self.path.push(PathSegment::Index(index));
                    let coerced = self.node(element, Some(item));
                    self.path.pop();
                    out.push(coerced.unwrap_or_else(|| item.clone()));
                }
                Value::Array(out)
            }
            _ => value.clone(),
        }
    }
}

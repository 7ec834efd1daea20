//! Masking: restrict a value to the fields its schema declares.
//!
//! Masking never validates and never invents fields. Declared fields that
//! are absent stay absent, so a masked value can still fail validation.

use crate::foundation::{FieldPath, Mask, PathSegment};
use crate::schema::{Schema, SchemaKind};
use serde_json::{Map, Value};

impl Mask for Schema {
    fn mask(&self, input: &Value) -> Value {
        mask_at(self, input, &mut FieldPath::root())
    }
}

/// Masks `value` with `schema`. Equivalent to [`Mask::mask`].
#[must_use]
pub fn mask(schema: &Schema, value: &Value) -> Value {
    schema.mask(value)
}

fn mask_at(schema: &Schema, value: &Value, path: &mut FieldPath) -> Value {
    match (schema.kind(), value) {
        (SchemaKind::Object(object), Value::Object(map)) => {
            let mut out = Map::with_capacity(object.fields().len().min(map.len()));
            for (key, item) in map {
                match object.field(key) {
                    Some(field) => {
                        path.push(PathSegment::Key(key.clone()));
                        out.insert(key.clone(), mask_at(field, item, path));
                        path.pop();
                    }
                    None => {
                        tracing::trace!(path = %path.key(key.as_str()), "masked undeclared field");
                    }
                }
            }
            Value::Object(out)
        }
        (SchemaKind::Array { element }, Value::Array(items)) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    path.push(PathSegment::Index(index));
                    let masked = mask_at(element, item, path);
                    path.pop();
                    masked
                })
                .collect(),
        ),
        _ => value.clone(),
    }
}

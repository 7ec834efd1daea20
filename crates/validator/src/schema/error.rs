//! Schema configuration errors.

use crate::foundation::{FieldPath, ValidationErrors};

/// A schema that cannot be loaded, or whose own defaults and coercion rules
/// contradict it.
///
/// These are configuration errors: they surface from [`Schema::check`]
/// and from loading schema documents, never from validating a value.
///
/// [`Schema::check`]: crate::schema::Schema::check
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// The schema document is not valid JSON or does not describe a schema.
    #[error("failed to parse schema document: {0}")]
    Parse(#[from] serde_json::Error),

    /// An enum node declares no allowed values.
    #[error("enum at {path} declares no allowed values")]
    EmptyEnum { path: FieldPath },

    /// A node's default value fails the node itself.
    #[error("default at {path} does not satisfy its schema: {errors}")]
    InvalidDefault {
        path: FieldPath,
        errors: ValidationErrors,
    },

    /// A coercion rule produces a value the node rejects.
    #[error("coercion at {path} produces a value its schema rejects: {errors}")]
    InvalidCoercion {
        path: FieldPath,
        errors: ValidationErrors,
    },

    /// A schema document uses a key its node kind does not define.
    #[error("unknown key \"{key}\" in schema node at {path}")]
    UnknownKey { path: FieldPath, key: String },

    /// `first_allowed` coercion is attached to a node that is not an enum.
    #[error("first_allowed coercion at {path} requires an enum schema, found {found}")]
    FirstAllowedWithoutEnum { path: FieldPath, found: &'static str },
}

impl SchemaError {
    /// Path of the offending schema node, if the error has one.
    #[must_use]
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Self::Parse(_) => None,
            Self::EmptyEnum { path }
            | Self::UnknownKey { path, .. }
            | Self::InvalidDefault { path, .. }
            | Self::InvalidCoercion { path, .. }
            | Self::FirstAllowedWithoutEnum { path, .. } => Some(path),
        }
    }
}

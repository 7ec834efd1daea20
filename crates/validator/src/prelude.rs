//! Prelude module for convenient imports.
//!
//! Provides a single `use shapeguard_validator::prelude::*;` import that
//! brings in the traits, builder functions and error types needed to author
//! schemas and run them.
//!
//! # Examples
//!
//! ```
//! use shapeguard_validator::prelude::*;
//! use serde_json::json;
//!
//! let port = object([("name", string()), ("locode", string().optional())]);
//! assert!(port.is_valid(&json!({"name": "SGSIN"})));
//! ```

// ============================================================================
// FOUNDATION: Core traits, errors, paths
// ============================================================================

pub use crate::foundation::{
    Coerce, ErrorKind, FieldError, FieldPath, Mask, PathSegment, Validate, ValidateExt,
    ValidationErrors,
};

// ============================================================================
// SCHEMA: Nodes and authoring API
// ============================================================================

pub use crate::schema::{
    ObjectSchema, Schema, SchemaError, SchemaKind, UnknownFields, array, assign, enums, number,
    object, string,
};

// ============================================================================
// OPERATIONS
// ============================================================================

pub use crate::coerce::{CoercionRule, CustomCoercion};
pub use crate::validate::{ParseError, ValidateOptions};

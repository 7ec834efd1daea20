//! # shapeguard-validator
//!
//! Declarative schema validation, coercion and masking for JSON values.
//!
//! A [`Schema`](schema::Schema) tree is built once and then used, read-only,
//! for any number of calls:
//!
//! - [`Validate`](foundation::Validate) walks a value and returns either the
//!   accepted value or every [`FieldError`](foundation::FieldError) found,
//!   each tagged with its path.
//! - [`Coerce`](foundation::Coerce) applies the coercion rules and defaults
//!   attached to the schema. Run it before validating
//!   ([`ValidateExt::create`](foundation::ValidateExt::create) does both).
//! - [`Mask`](foundation::Mask) strips fields the schema does not declare.
//!
//! ## Quick Start
//!
//! ```rust
//! use shapeguard_validator::prelude::*;
//! use serde_json::json;
//!
//! let port = object([
//!     ("name", string()),
//!     ("locode", string().optional()),
//!     ("source", enums(["imos", "predictive"]).with_coercion(CoercionRule::FirstAllowed)),
//! ]);
//!
//! // Validation collects errors as values.
//! let errors = port.validate(&json!({"name": "SGSIN"})).unwrap_err();
//! assert_eq!(errors.errors()[0].kind, ErrorKind::MissingRequired);
//!
//! // Coerce-then-validate replaces the unknown source with the first allowed one.
//! let created = port.create(&json!({"name": "Singapore", "locode": "SGSIN", "source": "sgsin"}));
//! assert_eq!(created, Ok(json!({"name": "Singapore", "locode": "SGSIN", "source": "imos"})));
//! ```
//!
//! ## Schema documents
//!
//! Schemas serialize to and from JSON documents; see [`schema`] for the
//! format and [`Schema::check`](schema::Schema::check) for the consistency
//! rules applied on load.

pub mod coerce;
pub mod foundation;
mod macros;
pub mod mask;
pub mod prelude;
pub mod schema;
pub mod validate;

pub use coerce::coerce;
pub use mask::mask;
pub use validate::validate;

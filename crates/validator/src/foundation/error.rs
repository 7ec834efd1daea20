//! Error types for validation failures
//!
//! Every failure is a [`FieldError`] tagged with the [`FieldPath`] of the
//! offending value and an [`ErrorKind`]. A validation call collects all of
//! them into a [`ValidationErrors`] instead of stopping at the first one.
//!
//! Message and parameter strings use `Cow<'static, str>` so the common
//! static messages never allocate.

use super::path::FieldPath;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// A non-optional field is absent and declares no default.
    MissingRequired,
    /// The value has a different JSON type than the schema expects.
    WrongType,
    /// The value is not one of the enum's allowed values.
    NotInEnum,
    /// The value is `null` but the schema is not nullable.
    NullNotAllowed,
    /// The object carries a field its schema does not declare, under
    /// [`UnknownFields::Reject`](crate::schema::UnknownFields::Reject).
    UnknownField,
}

impl ErrorKind {
    /// Stable error code for programmatic handling.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingRequired => "missing_required",
            Self::WrongType => "wrong_type",
            Self::NotInEnum => "not_in_enum",
            Self::NullNotAllowed => "null_not_allowed",
            Self::UnknownField => "unknown_field",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// FIELD ERROR
// ============================================================================

/// A path-tagged description of why a value failed validation.
///
/// # Examples
///
/// ```
/// use shapeguard_validator::foundation::{ErrorKind, FieldError, FieldPath};
///
/// let error = FieldError::wrong_type(FieldPath::root().key("count"), "number", "string");
/// assert_eq!(error.kind, ErrorKind::WrongType);
/// assert_eq!(error.param("expected"), Some("number"));
/// assert_eq!(error.to_string(), "[count] wrong_type: Expected number, got string");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Location of the offending value.
    pub path: FieldPath,

    /// Failure classification.
    pub kind: ErrorKind,

    /// Human-readable message in English.
    pub message: Cow<'static, str>,

    /// Structured details, e.g. `[("expected", "string"), ("actual", "number")]`.
    pub params: SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>,
}

impl FieldError {
    /// Creates a new error at `path`.
    pub fn new(path: FieldPath, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
            params: SmallVec::new(),
        }
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Stable code of the error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Creates a `MissingRequired` error.
    pub fn missing_required(path: FieldPath) -> Self {
        Self::new(path, ErrorKind::MissingRequired, "This field is required")
    }

    /// Creates a `WrongType` error.
    pub fn wrong_type(
        path: FieldPath,
        expected: impl Into<Cow<'static, str>>,
        actual: impl Into<Cow<'static, str>>,
    ) -> Self {
        let expected = expected.into();
        let actual = actual.into();
        Self::new(
            path,
            ErrorKind::WrongType,
            format!("Expected {expected}, got {actual}"),
        )
        .with_param("expected", expected)
        .with_param("actual", actual)
    }

    /// Creates a `NotInEnum` error listing the allowed values.
    pub fn not_in_enum(
        path: FieldPath,
        allowed: &[serde_json::Value],
        actual: &serde_json::Value,
    ) -> Self {
        let allowed = allowed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(
            path,
            ErrorKind::NotInEnum,
            format!("Expected one of [{allowed}], got {actual}"),
        )
        .with_param("allowed", allowed)
        .with_param("actual", actual.to_string())
    }

    /// Creates a `NullNotAllowed` error.
    pub fn null_not_allowed(path: FieldPath) -> Self {
        Self::new(path, ErrorKind::NullNotAllowed, "Value must not be null")
    }

    /// Creates an `UnknownField` error.
    pub fn unknown_field(path: FieldPath) -> Self {
        Self::new(
            path,
            ErrorKind::UnknownField,
            "Field is not declared by the schema",
        )
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.path, self.kind, self.message)
    }
}

impl std::error::Error for FieldError {}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let params: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();

        let mut state = serializer.serialize_struct("FieldError", 4)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("params", &params)?;
        state.end()
    }
}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// All errors produced by one validation call, in traversal order.
///
/// Within an object, errors follow field declaration order; nested values
/// are reported depth-first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates a new empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error to the collection.
    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Adds multiple errors to the collection.
    pub fn extend(&mut self, errors: impl IntoIterator<Item = FieldError>) {
        self.errors.extend(errors);
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Iterates over the errors in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Returns the errors of the given kind.
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }

    /// Returns the first error located exactly at `path`.
    #[must_use]
    pub fn at(&self, path: &FieldPath) -> Option<&FieldError> {
        self.errors.iter().find(|e| &e.path == path)
    }

    /// Consumes the collection and returns the errors.
    #[must_use]
    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }

    /// Converts to a Result.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} error(s)", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// TESTS
// ============================================================================

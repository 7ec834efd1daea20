//! Macros for declaring schemas with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`object!`]: an object node from `name: schema` pairs
//!
//! # Examples
//!
//! ```
//! use shapeguard_validator::object;
//! use shapeguard_validator::prelude::*;
//!
//! let airport = object! {
//!     name: string(),
//!     code: string(),
//!     nullableCode: string().nullable(),
//!     optionalCode: string().optional(),
//!     "IATA code": string().optional(),
//! };
//! assert_eq!(airport.as_object().unwrap().fields().len(), 5);
//! ```

// ============================================================================
// OBJECT MACRO
// ============================================================================

/// Declares an object node.
///
/// Field names are written as identifiers (used verbatim, case kept) or as
/// string literals for names that are not valid identifiers. Fields keep
/// their written order.
///
/// ```
/// use shapeguard_validator::object;
/// use shapeguard_validator::prelude::*;
///
/// let empty = object! {};
/// assert!(empty.as_object().unwrap().fields().is_empty());
///
/// let port = object! { name: string(), locode: string().optional() };
/// assert_eq!(port, object([("name", string()), ("locode", string().optional())]));
/// ```
#[macro_export]
macro_rules! object {
    () => {
        $crate::schema::object(::std::iter::empty::<(&str, $crate::schema::Schema)>())
    };

    ($($name:tt : $schema:expr),+ $(,)?) => {
        $crate::schema::object([
            $(($crate::__field_name!($name), $schema)),+
        ])
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_name {
    ($name:ident) => {
        stringify!($name)
    };
    ($name:literal) => {
        $name
    };
}

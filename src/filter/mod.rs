//! Filter expression compilation and matching
//!
//! This module implements the rule language used to decide which diagnostic
//! records are surfaced. A list of filter strings is compiled once into a
//! [`FilterExpression`]; each record is then evaluated to a boolean.
//!
//! # Syntax
//!
//! ```text
//! path:pattern          Keep records whose field matches the pattern
//! !path:pattern         Keep records whose field does NOT match
//! a:1&b:2               '&' combines tests within one filter (AND)
//! ```
//!
//! Separate filter strings combine with OR: a record is kept as soon as one
//! of them matches. An empty filter list keeps every record.
//!
//! # Paths and patterns
//!
//! - `code:ABC` - direct field lookup
//! - `loc.line:5` - dotted paths walk nested objects
//! - `message:*timeout*` - `*` matches zero or more characters
//! - `loc:{file:'main.js', *}` - object rules test nested fields in order
//!
//! Object rule entries are positional: `{code:'E1', *}` matches a record
//! whose first field is `code` with value `"E1"`, with `*` absorbing the
//! remaining fields. `{*, code:'E1'}` instead requires `code` to be the
//! last field.
//!
//! # Examples
//!
//! ```text
//! code:CIRCULAR_DEPENDENCY                # one specific diagnostic code
//! !code:EMPTY_BUNDLE                      # everything but this code
//! level:warn&plugin:commonjs              # warnings from one plugin
//! loc.file:*src/main.js                   # diagnostics for one file
//! ```

pub mod error;
pub mod matcher;
pub mod parser;

pub use error::{FilterParseError, ObjectRuleError};
pub use matcher::{ResolvedValue, WildcardMode, object_match, resolve_path, wildcard_match};
pub use parser::{Clause, FilterExpression, Matcher, ObjectEntry, Predicate};

/// One structured diagnostic record. Key order is insertion order and is
/// significant for object-rule matching.
pub type Record = serde_json::Map<String, serde_json::Value>;

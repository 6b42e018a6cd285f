use super::error::{FilterParseError, ObjectRuleError};
use super::matcher::WildcardMode;
use serde_json::Value;

/// One entry of an object rule, in the order written in the rule text
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectEntry {
    /// `*` - absorbs zero or more record fields
    Wildcard,
    /// `key:value` - the field at the current position must have this key
    /// and exactly this value
    Field(String, Value),
}

/// The matcher half of a predicate, fixed at parse time from the first
/// character of the rule body
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Literal text with `*` wildcards
    Pattern(String),
    /// `{...}` ordered field constraints
    Object(Vec<ObjectEntry>),
}

/// A single `path:rule` test (e.g. `code:PLUGIN_*` or `!level:debug`)
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Dotted field path, `!` marker already stripped
    pub path: String,
    /// Whether the test is negated (path was prefixed with `!`)
    pub inverted: bool,
    pub matcher: Matcher,
}

impl Predicate {
    /// Parse a single filter clause from a string
    pub fn parse(s: &str) -> Result<Self, FilterParseError> {
        let (raw_path, body) =
            split_clause(s).ok_or_else(|| FilterParseError::MissingSeparator(s.to_string()))?;

        let raw_path = raw_path.trim();
        let (inverted, path) = match raw_path.strip_prefix('!') {
            Some(stripped) => (true, stripped.trim()),
            None => (false, raw_path),
        };

        let body = body.trim();
        let matcher = if body.starts_with('{') {
            let entries = parse_object_rule(body).map_err(|source| {
                FilterParseError::ObjectRule {
                    clause: s.to_string(),
                    source,
                }
            })?;
            Matcher::Object(entries)
        } else {
            Matcher::Pattern(body.to_string())
        };

        Ok(Predicate {
            path: path.to_string(),
            inverted,
            matcher,
        })
    }
}

/// Split a clause at the first unescaped ':'. A `\:` sequence keeps the
/// colon in the path.
fn split_clause(s: &str) -> Option<(String, &str)> {
    let mut path = String::new();
    let mut chars = s.char_indices();

    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some((_, escaped)) => path.push(escaped),
                None => path.push('\\'),
            },
            ':' => return Some((path, &s[i + ch.len_utf8()..])),
            _ => path.push(ch),
        }
    }

    None
}

/// Parse an object rule body of the form `{key:value, 'quoted key':value, *}`.
///
/// Scanning is character by character; the first `:` after a key switches
/// accumulation to the value buffer, `,` and the closing `}` flush the
/// pending entry. Nested object values are rejected.
fn parse_object_rule(body: &str) -> Result<Vec<ObjectEntry>, ObjectRuleError> {
    let mut entries = Vec::new();
    let mut key: Option<String> = None;
    let mut value: Option<String> = None;
    let mut closed = false;

    for ch in body.chars().skip(1) {
        match ch {
            '}' => {
                closed = true;
                break;
            }
            '{' => return Err(ObjectRuleError::NestedObject),
            ',' => flush_entry(&mut entries, key.take(), value.take(), false)?,
            ':' if value.is_none() => {
                if key.is_none() {
                    key = Some(String::new());
                }
                value = Some(String::new());
            }
            _ => match value.as_mut() {
                Some(buffer) => buffer.push(ch),
                None => key.get_or_insert_with(String::new).push(ch),
            },
        }
    }

    if !closed {
        return Err(ObjectRuleError::Unterminated);
    }
    flush_entry(&mut entries, key, value, true)?;

    Ok(entries)
}

/// Emit the pending entry accumulated before a `,` or the closing `}`.
/// At the end of the body an empty pending state is fine (trailing comma);
/// at a `,` it is a syntax error.
fn flush_entry(
    entries: &mut Vec<ObjectEntry>,
    key: Option<String>,
    value: Option<String>,
    at_end: bool,
) -> Result<(), ObjectRuleError> {
    match (key, value) {
        (Some(key), Some(value)) => {
            let key = key.trim();
            let value = value.trim();
            if key.is_empty() || value.is_empty() {
                return Err(ObjectRuleError::IncompleteEntry(format!("{key}:{value}")));
            }
            entries.push(ObjectEntry::Field(decode_key(key)?, parse_literal(value)?));
        }
        (Some(key), None) => {
            if key.trim() == "*" {
                entries.push(ObjectEntry::Wildcard);
            } else {
                return Err(ObjectRuleError::IncompleteEntry(key.trim().to_string()));
            }
        }
        (None, Some(value)) => {
            return Err(ObjectRuleError::IncompleteEntry(value.trim().to_string()));
        }
        (None, None) => {
            if !at_end {
                return Err(ObjectRuleError::IncompleteEntry(String::new()));
            }
        }
    }
    Ok(())
}

/// Unwrap a quoted key, or take a bare key verbatim
fn decode_key(key: &str) -> Result<String, ObjectRuleError> {
    if key.starts_with('\'') || key.starts_with('"') {
        json5::from_str::<String>(key)
            .map_err(|e| ObjectRuleError::InvalidKey(key.to_string(), e.to_string()))
    } else {
        Ok(key.to_string())
    }
}

/// Parse an entry value as a literal (string, number, boolean or null).
/// serde_json covers standard literals; json5 is the fallback so that
/// single-quoted strings work.
fn parse_literal(value: &str) -> Result<Value, ObjectRuleError> {
    if let Ok(literal) = serde_json::from_str::<Value>(value) {
        return Ok(literal);
    }
    json5::from_str::<Value>(value)
        .map_err(|e| ObjectRuleError::InvalidLiteral(value.to_string(), e.to_string()))
}

/// One OR-branch of a filter expression: every predicate must pass
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    predicates: Vec<Predicate>,
}

impl Clause {
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }
}

/// A compiled filter expression. Immutable once compiled; evaluation only
/// reads it, so a compiled expression can be shared across threads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterExpression {
    clauses: Vec<Clause>,
    mode: WildcardMode,
}

impl FilterExpression {
    /// Compile a list of filter strings with the default wildcard matcher.
    ///
    /// An empty list compiles to the pass-through expression that keeps
    /// every record. The first malformed clause aborts compilation.
    pub fn compile<S: AsRef<str>>(filters: &[S]) -> Result<Self, FilterParseError> {
        Self::compile_with(filters, WildcardMode::default())
    }

    /// Compile with an explicit wildcard matching mode
    pub fn compile_with<S: AsRef<str>>(
        filters: &[S],
        mode: WildcardMode,
    ) -> Result<Self, FilterParseError> {
        let mut clauses = Vec::new();

        for filter in filters {
            let mut predicates = Vec::new();
            for part in filter.as_ref().split('&') {
                if part.trim().is_empty() {
                    continue;
                }
                predicates.push(Predicate::parse(part)?);
            }
            // A filter string with no usable segments contributes nothing
            if !predicates.is_empty() {
                clauses.push(Clause { predicates });
            }
        }

        Ok(FilterExpression { clauses, mode })
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn mode(&self) -> WildcardMode {
        self.mode
    }

    /// Whether this expression keeps every record unconditionally
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

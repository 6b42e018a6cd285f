use super::Record;
use super::parser::{FilterExpression, Matcher, ObjectEntry, Predicate};
use serde_json::Value;
use std::borrow::Cow;

/// How `*` wildcards in string patterns are interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WildcardMode {
    /// Single left-to-right scan with one character of lookahead at each
    /// `*`. This is the historical behavior: it handles single-wildcard
    /// patterns and the usual prefix/suffix shapes, but is not correct for
    /// every multi-wildcard pattern because it never revisits a committed
    /// decision.
    #[default]
    OneLookahead,
    /// Greedy matching with backtracking, correct for all patterns.
    /// Opt-in only; the default is never changed silently.
    Backtracking,
}

/// Match a wildcard pattern against a text value. `*` matches zero or more
/// characters; everything else is literal.
pub fn wildcard_match(pattern: &str, text: &str, mode: WildcardMode) -> bool {
    match mode {
        WildcardMode::OneLookahead => match_one_lookahead(pattern, text),
        WildcardMode::Backtracking => match_backtracking(pattern, text),
    }
}

fn match_one_lookahead(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let mut i = 0;
    let mut j = 0;

    while i < pattern.len() && j < text.len() {
        if pattern[i] == '*' {
            // Trailing wildcard absorbs the rest of the text
            if i == pattern.len() - 1 {
                return true;
            }
            // Commit to the literal after the '*' as soon as it lines up
            if pattern[i + 1] == text[j] {
                i += 1;
            } else {
                j += 1;
            }
            continue;
        }

        if pattern[i] != text[j] {
            return false;
        }
        i += 1;
        j += 1;
    }

    if i < pattern.len() && pattern[i] == '*' {
        i += 1;
    }

    i == pattern.len() && j == text.len()
}

fn match_backtracking(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let mut i = 0;
    let mut j = 0;
    let mut star: Option<usize> = None;
    let mut mark = 0;

    while j < text.len() {
        if i < pattern.len() && (pattern[i] == text[j]) && pattern[i] != '*' {
            i += 1;
            j += 1;
        } else if i < pattern.len() && pattern[i] == '*' {
            star = Some(i);
            mark = j;
            i += 1;
        } else if let Some(star_index) = star {
            // Let the last '*' swallow one more character and retry
            i = star_index + 1;
            mark += 1;
            j = mark;
        } else {
            return false;
        }
    }

    while i < pattern.len() && pattern[i] == '*' {
        i += 1;
    }

    i == pattern.len()
}

/// Match an object rule against a record's fields taken in their own
/// insertion order. The rule is positional: literal entries must appear in
/// the same relative order as the record's fields, with `*` absorbing any
/// number of unmatched fields.
pub fn object_match(rule: &[ObjectEntry], fields: &Record) -> bool {
    let fields: Vec<(&String, &Value)> = fields.iter().collect();
    let mut i = 0;
    let mut j = 0;

    while i < rule.len() && j < fields.len() {
        match &rule[i] {
            ObjectEntry::Wildcard => {
                if i == rule.len() - 1 {
                    return true;
                }
                match &rule[i + 1] {
                    ObjectEntry::Field(key, value)
                        if fields[j].0 == key && fields[j].1 == value =>
                    {
                        i += 1;
                    }
                    _ => j += 1,
                }
            }
            ObjectEntry::Field(key, value) => {
                if fields[j].0 != key || fields[j].1 != value {
                    return false;
                }
                i += 1;
                j += 1;
            }
        }
    }

    if matches!(rule.get(i), Some(ObjectEntry::Wildcard)) {
        i += 1;
    }

    i == rule.len() && j == fields.len()
}

/// A record value normalized for matching
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue<'a> {
    /// Strings pass through; numbers and null take their text form so that
    /// string patterns compare uniformly.
    Text(Cow<'a, str>),
    /// Booleans, objects and arrays are handed over unconverted. A string
    /// pattern applied to one of these never matches.
    Raw(&'a Value),
}

/// Resolve a dotted path against a record.
///
/// Returns `None` when a direct field is absent or an intermediate segment
/// of a dotted path is not an object. A missing final segment after a
/// successful walk resolves to the text `"undefined"`.
pub fn resolve_path<'a>(record: &'a Record, path: &str) -> Option<ResolvedValue<'a>> {
    if !path.contains('.') {
        return record.get(path).map(normalize);
    }

    let mut segments: Vec<&str> = path.split('.').collect();
    let last = segments.pop()?;

    let mut current = record;
    for segment in segments {
        current = current.get(segment)?.as_object()?;
    }

    match current.get(last) {
        Some(value) => Some(normalize(value)),
        None => Some(ResolvedValue::Text(Cow::Borrowed("undefined"))),
    }
}

fn normalize(value: &Value) -> ResolvedValue<'_> {
    match value {
        Value::String(text) => ResolvedValue::Text(Cow::Borrowed(text)),
        Value::Number(number) => ResolvedValue::Text(Cow::Owned(number.to_string())),
        Value::Null => ResolvedValue::Text(Cow::Borrowed("null")),
        other => ResolvedValue::Raw(other),
    }
}

/// Evaluate one predicate. An unresolvable path fails the predicate
/// regardless of inversion.
fn eval_predicate(predicate: &Predicate, record: &Record, mode: WildcardMode) -> bool {
    let Some(resolved) = resolve_path(record, &predicate.path) else {
        return false;
    };

    let matched = match (&predicate.matcher, &resolved) {
        (Matcher::Pattern(pattern), ResolvedValue::Text(text)) => {
            wildcard_match(pattern, text, mode)
        }
        (Matcher::Object(rule), ResolvedValue::Raw(Value::Object(fields))) => {
            object_match(rule, fields)
        }
        // String pattern against a boolean/object/array, or object rule
        // against a non-object: never a match
        _ => false,
    };

    matched != predicate.inverted
}

impl FilterExpression {
    /// Decide whether a record passes this expression: OR across clauses,
    /// AND across a clause's predicates, both short-circuiting. An empty
    /// expression keeps every record.
    pub fn matches(&self, record: &Record) -> bool {
        if self.is_empty() {
            return true;
        }

        self.clauses().iter().any(|clause| {
            clause
                .predicates()
                .iter()
                .all(|predicate| eval_predicate(predicate, record, self.mode()))
        })
    }
}

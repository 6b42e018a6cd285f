use crate::config::DisplayRules;
use crate::filter::{FilterExpression, Matcher, ObjectEntry, Record};
use colored::{ColoredString, Colorize};
use comfy_table::{Table, presets::UTF8_FULL};
use serde_json::Value;

/// Render one matching record as a single text line: colored level, code,
/// message, then any remaining fields as compact JSON.
pub fn format_record(record: &Record, rules: &DisplayRules) -> String {
    let level = field_str(record, &rules.level_field);
    let code = field_str(record, &rules.code_field);
    let message = field_str(record, &rules.message_field);

    let mut line = String::new();
    if let Some(level) = level {
        line.push_str(&format!("{} ", colorize_level(level)));
    }
    if let Some(code) = code {
        line.push_str(&format!("[{}] ", code.cyan()));
    }

    let Some(message) = message else {
        // No message field: show the whole record instead
        line.push_str(&compact_json_object(record));
        return line;
    };
    line.push_str(message);

    let rest: Record = record
        .iter()
        .filter(|(key, _)| {
            *key != &rules.level_field && *key != &rules.code_field && *key != &rules.message_field
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    if !rest.is_empty() {
        let extra = compact_json_object(&rest);
        line.push_str(&format!("  {}", extra.dimmed()));
    }

    line
}

fn field_str<'a>(record: &'a Record, field: &str) -> Option<&'a str> {
    record.get(field).and_then(Value::as_str)
}

fn compact_json_object(record: &Record) -> String {
    serde_json::to_string(record).unwrap_or_default()
}

fn colorize_level(level: &str) -> ColoredString {
    match level.to_ascii_uppercase().as_str() {
        "ERROR" | "FATAL" => level.red().bold(),
        "WARN" | "WARNING" => level.yellow(),
        "INFO" => level.green(),
        "DEBUG" | "TRACE" => level.dimmed(),
        _ => level.normal(),
    }
}

/// Render a compiled expression as a table, one row per predicate
pub fn expression_table(expr: &FilterExpression) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["clause", "path", "inverted", "rule"]);

    for (index, clause) in expr.clauses().iter().enumerate() {
        for predicate in clause.predicates() {
            table.add_row(vec![
                (index + 1).to_string(),
                predicate.path.clone(),
                if predicate.inverted { "yes" } else { "" }.to_string(),
                describe_matcher(&predicate.matcher),
            ]);
        }
    }

    table
}

fn describe_matcher(matcher: &Matcher) -> String {
    match matcher {
        Matcher::Pattern(pattern) => format!("pattern '{pattern}'"),
        Matcher::Object(entries) => {
            let parts: Vec<String> = entries
                .iter()
                .map(|entry| match entry {
                    ObjectEntry::Wildcard => "*".to_string(),
                    ObjectEntry::Field(key, value) => format!("{key}:{value}"),
                })
                .collect();
            format!("object {{{}}}", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_format_record_shows_message_and_extra_fields() {
        let rules = DisplayRules::default();
        let line = format_record(
            &record(json!({"level": "warn", "code": "E1", "message": "boom", "pos": 3})),
            &rules,
        );
        assert!(line.contains("boom"));
        assert!(line.contains("\"pos\":3"));
    }

    #[test]
    fn test_format_record_without_message_dumps_json() {
        let rules = DisplayRules::default();
        let line = format_record(&record(json!({"pos": 3})), &rules);
        assert!(line.contains("{\"pos\":3}"));
    }

    #[test]
    fn test_describe_object_matcher() {
        let matcher = Matcher::Object(vec![
            ObjectEntry::Field("code".to_string(), json!("E1")),
            ObjectEntry::Wildcard,
        ]);
        assert_eq!(describe_matcher(&matcher), "object {code:\"E1\", *}");
    }
}
